//! Generation of random primes.

use alloc::vec;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::prime::{is_probably_prime, DEFAULT_ROUNDS};

/// A generic trait for generating random primes.
///
/// *Warning*: This is highly dependent on the provided random number generator,
/// to provide actually random primes.
///
/// # Example
/// ```
/// use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
/// use rsa_kit::RandPrime;
///
/// let mut rng = ChaCha8Rng::from_seed([7; 32]);
/// let p = rng.gen_prime(256);
/// assert_eq!(p.bits(), 256);
/// ```
pub trait RandPrime {
    /// Generate a random probable prime with exactly `bit_size` bits, tested
    /// with the default number of Miller-Rabin rounds.
    ///
    /// Panics if `bit_size < 2`.
    fn gen_prime(&mut self, bit_size: usize) -> BigUint {
        self.gen_prime_with_rounds(bit_size, DEFAULT_ROUNDS)
    }

    /// Generate a random probable prime with exactly `bit_size` bits, tested
    /// with `rounds` Miller-Rabin rounds.
    fn gen_prime_with_rounds(&mut self, bit_size: usize, rounds: usize) -> BigUint;
}

impl<R: CryptoRngCore + ?Sized> RandPrime for R {
    fn gen_prime_with_rounds(&mut self, bit_size: usize, rounds: usize) -> BigUint {
        assert!(bit_size >= 2, "prime size must be at least 2-bit");

        let mut b = bit_size % 8;
        if b == 0 {
            b = 8;
        }

        let bytes_len = (bit_size + 7) / 8;
        let mut bytes = vec![0u8; bytes_len];

        loop {
            self.fill_bytes(&mut bytes);
            // Clear bits in the first byte to make sure the candidate has a size <= bits.
            bytes[0] &= ((1u32 << (b as u32)) - 1) as u8;

            // Set the two most significant bits, so that the product of two
            // such values is never one bit short.
            if b >= 2 {
                bytes[0] |= 3u8.wrapping_shl(b as u32 - 2);
            } else {
                bytes[0] |= 1;
                bytes[1] |= 0x80;
            }

            // Make the value odd since an even number this large certainly isn't prime.
            bytes[bytes_len - 1] |= 1u8;

            let mut candidate = BigUint::from_bytes_be(&bytes);
            while candidate.bits() == bit_size {
                if is_probably_prime(self, &candidate, rounds).is_probably_prime() {
                    return candidate;
                }
                candidate += 2u32;
            }

            log::trace!("prime search ran past {} bits, drawing a new candidate", bit_size);
        }
    }
}
