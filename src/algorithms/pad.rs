//! Conversions between `BigUint` and big-endian octet strings.

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::InvalidPadLen);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Converts input to the new vector of the given length, using BE and with 0s left padded.
#[inline]
pub(crate) fn uint_to_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    left_pad(&input.to_bytes_be(), padded_len)
}

/// Like [`uint_to_be_pad`], wiping the integer and every intermediate copy.
#[inline]
pub(crate) fn uint_to_zeroizing_be_pad(
    input: BigUint,
    padded_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let m = Zeroizing::new(input);
    let m = Zeroizing::new(m.to_bytes_be());
    left_pad(&m, padded_len).map(Zeroizing::new)
}

/// Number of bytes needed to hold `n`; zero for `n == 0`.
pub fn byte_length(n: &BigUint) -> usize {
    (n.bits() + 7) / 8
}

/// Interprets `bytes` as an unsigned big-endian integer.
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Unsigned big-endian encoding of `value`.
///
/// With `length` the output is zero-padded on the left to exactly that many
/// bytes (`Error::InvalidPadLen` if the value does not fit), otherwise it has
/// the minimal length, which is empty for zero.
pub fn int_to_bytes(value: &BigUint, length: Option<usize>) -> Result<Vec<u8>> {
    let minimal = if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    };

    match length {
        Some(length) => left_pad(&minimal, length),
        None => Ok(minimal),
    }
}
