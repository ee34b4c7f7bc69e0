//! Support for the [Probabilistic Signature Scheme] (PSS) a.k.a. RSASSA-PSS.
//!
//! Designed by Mihir Bellare and Phillip Rogaway. Specified in [RFC8017 § 9.1].
//!
//! [Probabilistic Signature Scheme]: https://en.wikipedia.org/wiki/Probabilistic_signature_scheme
//! [RFC8017 § 9.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.1

use alloc::vec::Vec;
use digest::DynDigest;
use subtle::ConstantTimeEq;

use super::mgf::mgf1_xor;
use crate::errors::{Error, PssPaddingError, Result};

/// EMSA-PSS encoding of an already hashed message into `ceil(em_bits / 8)` bytes.
pub fn emsa_pss_encode(
    m_hash: &[u8],
    em_bits: usize,
    salt: &[u8],
    hash: &mut dyn DynDigest,
) -> Result<Vec<u8>> {
    // See [1], section 9.1.1
    let h_len = hash.output_size();
    let s_len = salt.len();
    let em_len = (em_bits + 7) / 8;

    // 1. If the length of M is greater than the input limitation for the
    //     hash function (2^61 - 1 octets for SHA-1), output "message too
    //     long" and stop.
    //
    // 2.  Let mHash = Hash(M), an octet string of length hLen.
    if m_hash.len() != h_len {
        return Err(Error::InputNotHashed);
    }

    // 3. If em_len < h_len + s_len + 2, output "encoding error" and stop.
    if em_len < h_len + s_len + 2 {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0; em_len];

    let (db, h) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut h[..h_len];

    // 5.  Let
    //       M' = (0x)00 00 00 00 00 00 00 00 || m_hash || salt;
    //
    // 6.  Let H = Hash(M'), an octet string of length h_len.
    let prefix = [0u8; 8];

    hash.update(&prefix);
    hash.update(m_hash);
    hash.update(salt);

    let hashed = hash.finalize_reset();
    h.copy_from_slice(&hashed);

    // 7.  Generate an octet string PS consisting of em_len - s_len - h_len - 2
    //     zero octets. The length of PS may be 0.
    //
    // 8.  Let DB = PS || 0x01 || salt; DB is an octet string of length
    //     emLen - hLen - 1.
    db[em_len - s_len - h_len - 2] = 0x01;
    db[em_len - s_len - h_len - 1..].copy_from_slice(salt);

    // 9.  Let dbMask = MGF(H, emLen - hLen - 1).
    //
    // 10. Let maskedDB = DB \xor dbMask.
    mgf1_xor(db, hash, h);

    // 11. Set the leftmost 8 * em_len - em_bits bits of the leftmost octet in
    //     maskedDB to zero.
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    // 12. Let EM = maskedDB || H || 0xbc.
    em[em_len - 1] = 0xBC;

    Ok(em)
}

/// EMSA-PSS verification of a recovered signature block.
///
/// `em` is the block as wide as the modulus; any bytes in front of the
/// `ceil(em_bits / 8)` encoded bytes must be zero. `s_len` fixes the salt
/// length, `None` finds it from the position of the `0x01` delimiter.
///
/// Returns `Ok(false)` if the block is well formed but was produced for a
/// different message, and a [`PssPaddingError`] if it is malformed.
pub fn emsa_pss_verify(
    m_hash: &[u8],
    em: &mut [u8],
    em_bits: usize,
    s_len: Option<usize>,
    hash: &mut dyn DynDigest,
) -> Result<bool> {
    let h_len = hash.output_size();
    let em_len = (em_bits + 7) / 8;

    // 2. Let mHash = Hash(M), an octet string of length hLen
    if m_hash.len() != h_len {
        return Err(Error::InputNotHashed);
    }
    if em.len() < em_len {
        return Err(Error::InvalidPadLen);
    }

    let (high, em) = em.split_at_mut(em.len() - em_len);
    if high.iter().any(|b| *b != 0) {
        return Err(Error::PssPadding(PssPaddingError::HighBits));
    }

    // 3. If emLen < hLen + sLen + 2, output "inconsistent" and stop.
    if em_len < h_len + s_len.unwrap_or(0) + 2 {
        return Err(Error::MessageTooLong);
    }

    // 4. If the rightmost octet of EM does not have hexadecimal value
    //    0xbc, output "inconsistent" and stop.
    if em[em_len - 1] != 0xBC {
        return Err(Error::PssPadding(PssPaddingError::Trailer));
    }

    // 5. Let maskedDB be the leftmost emLen - hLen - 1 octets of EM, and
    //    let H be the next hLen octets.
    let (db, h) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut h[..h_len];

    // 6. If the leftmost 8 * em_len - em_bits bits of the leftmost octet in
    //    maskedDB are not all equal to zero, output "inconsistent" and
    //    stop.
    let high_mask = 0xFF_u8
        .checked_shl(8 - (8 * em_len - em_bits) as u32)
        .unwrap_or(0);
    if db[0] & high_mask != 0 {
        return Err(Error::PssPadding(PssPaddingError::HighBits));
    }

    // 7. Let dbMask = MGF(H, emLen - hLen - 1).
    //
    // 8. Let DB = maskedDB \xor dbMask
    mgf1_xor(db, hash, h);

    // 9.  Set the leftmost 8 * emLen - emBits bits of the leftmost octet in DB
    //     to zero.
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    // 10. If the emLen - hLen - sLen - 2 leftmost octets of DB are not zero
    //     or if the octet at position emLen - hLen - sLen - 1 (the leftmost
    //     position is "position 1") does not have hexadecimal value 0x01,
    //     output "inconsistent" and stop.
    let delimiter = match s_len {
        Some(s_len) => {
            let delimiter = em_len - h_len - s_len - 2;
            if db[..delimiter].iter().any(|b| *b != 0) {
                return Err(Error::PssPadding(PssPaddingError::NonZeroPadding));
            }
            delimiter
        }
        None => match db.iter().position(|b| *b != 0) {
            Some(delimiter) => delimiter,
            None => return Err(Error::PssPadding(PssPaddingError::MissingDelimiter)),
        },
    };
    match db[delimiter] {
        0x01 => {}
        _ if s_len.is_none() => {
            return Err(Error::PssPadding(PssPaddingError::NonZeroPadding))
        }
        _ => return Err(Error::PssPadding(PssPaddingError::MissingDelimiter)),
    }

    // 11. Let salt be the last sLen octets of DB.
    let salt = &db[delimiter + 1..];

    // 12. Let
    //          M' = (0x)00 00 00 00 00 00 00 00 || mHash || salt ;
    //     M' is an octet string of length 8 + hLen + sLen with eight
    //     initial zero octets.
    //
    // 13. Let H' = Hash(M'), an octet string of length hLen.
    let prefix = [0u8; 8];

    hash.update(&prefix[..]);
    hash.update(m_hash);
    hash.update(salt);
    let h0 = hash.finalize_reset();

    // 14. If H = H', output "consistent." Otherwise, output "inconsistent."
    Ok(h0.ct_eq(h).into())
}
