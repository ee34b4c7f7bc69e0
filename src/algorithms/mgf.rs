//! Mask generation function common to both PSS and OAEP padding

use alloc::vec::Vec;
use digest::DynDigest;

/// XORs `out` with `MGF1(seed, out.len())`.
///
/// MGF1 hashes `seed || counter` for a big-endian 32-bit counter starting at
/// zero and concatenates the outputs.
///
/// Panics if out is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
pub fn mgf1_xor(out: &mut [u8], digest: &mut dyn DynDigest, seed: &[u8]) {
    const MAX_LEN: u64 = u32::MAX as u64 + 1;
    assert!(out.len() as u64 <= MAX_LEN);

    let mut counter = [0u8; 4];
    let h_len = digest.output_size();

    for chunk in out.chunks_mut(h_len) {
        digest.update(seed);
        digest.update(&counter);
        let digest_output = digest.finalize_reset();

        for (o, d) in chunk.iter_mut().zip(digest_output.iter()) {
            *o ^= *d;
        }
        inc_counter(&mut counter);
    }
}

/// Returns `MGF1(seed, len)`.
pub fn mgf1(seed: &[u8], len: usize, digest: &mut dyn DynDigest) -> Vec<u8> {
    let mut mask = vec![0u8; len];
    mgf1_xor(&mut mask, digest, seed);
    mask
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}
