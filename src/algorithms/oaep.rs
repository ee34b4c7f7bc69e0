//! Encoding and decoding of [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
use alloc::vec::Vec;

use digest::DynDigest;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, OaepPaddingError, Result};

// 2**61 -1 (pow is not const yet)
const MAX_LABEL_LEN: u64 = 2_305_843_009_213_693_951;

/// Applies the OAEP padding to `msg`, producing a block of exactly `k` bytes.
///
/// The message must be no longer than `k - 2 - 2 * digest.output_size()`.
/// `digest` hashes the label, `mgf_digest` drives MGF1.
#[inline]
pub fn oaep_encrypt_pad<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    digest: &mut dyn DynDigest,
    mgf_digest: &mut dyn DynDigest,
    label: Option<&[u8]>,
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let h_size = digest.output_size();
    let label = label.unwrap_or_default();
    if label.len() as u64 > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong);
    }
    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    digest.update(label);
    let p_hash = digest.finalize_reset();

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB =  pHash || PS || 01 || M
    let db_len = k - h_size - 1;

    db[0..h_size].copy_from_slice(&p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    mgf1_xor(db, mgf_digest, seed);
    mgf1_xor(seed, mgf_digest, db);

    Ok(em)
}

/// Removes the OAEP padding from a block of exactly `k` bytes.
///
/// The structure is checked without data-dependent branches; only the final
/// verdict picks which of the failed checks to report, in the order leading
/// byte, label hash, delimiter, padding. Whether and how this fails discloses
/// information about the plaintext; see [`Error::is_padding_error`].
#[inline]
pub fn oaep_decrypt_unpad(
    em: &mut [u8],
    digest: &mut dyn DynDigest,
    mgf_digest: &mut dyn DynDigest,
    label: Option<&[u8]>,
    k: usize,
) -> Result<Vec<u8>> {
    let h_size = digest.output_size();
    let label = label.unwrap_or_default();
    if label.len() as u64 > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong);
    }
    if em.len() != k || k < h_size * 2 + 2 {
        return Err(Error::OaepPadding(OaepPaddingError::Decomposition));
    }

    digest.update(label);
    let expected_p_hash = digest.finalize_reset();

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    mgf1_xor(seed, mgf_digest, db);
    mgf1_xor(db, mgf_digest, seed);

    let hash_are_equal = db[0..h_size].ct_eq(&expected_p_hash);

    // The remainder of the plaintext must be zero or more 0x00, followed
    // by 0x01, followed by the message.
    //   looking_for_index: 1 if we are still looking for the 0x01
    //   index: the offset of the first 0x01 byte
    //   nonzero_before_one: 1 if we saw a non-zero byte before the 1
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;
    if !bool::from(valid) {
        let reason = if !bool::from(first_byte_is_zero) {
            OaepPaddingError::LeadingByte
        } else if !bool::from(hash_are_equal) {
            OaepPaddingError::LabelHash
        } else if bool::from(looking_for_index) {
            OaepPaddingError::MissingDelimiter
        } else {
            OaepPaddingError::NonZeroPadding
        };
        return Err(Error::OaepPadding(reason));
    }

    Ok(db[h_size + index as usize + 1..].to_vec())
}
