//! Generate prime components for the RSA Private Key

use alloc::vec::Vec;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};
use crate::key::KeyGenConfig;
use crate::math::ModInverse;
use crate::prime_rand::RandPrime;

/// Smallest accepted modulus size in bits.
pub(crate) const MIN_KEY_BITS: usize = 512;

/// The primes must differ in more than their low `prime_bits - 100` bits.
const MIN_PRIME_DISTANCE_SLACK: usize = 100;

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: Vec<BigUint>,
}

/// Generates a two-prime RSA keypair described by `config`.
///
/// Both primes have `bits / 2` bits with their two top bits set, so the
/// modulus has exactly `bits` bits. Pairs that are too close to each other
/// (`|p - q| <= 2^(bits/2 - 100)`) or for which the public exponent has no
/// inverse modulo the totient are discarded and drawn again.
pub(crate) fn generate_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    config: &KeyGenConfig,
) -> Result<RsaPrivateKeyComponents> {
    let bit_size = config.bits;
    if bit_size < MIN_KEY_BITS || bit_size % 8 != 0 {
        return Err(Error::InvalidKeySize);
    }

    let exp = &config.public_exponent;
    if exp < &BigUint::from(3u32) || exp.is_even() {
        return Err(Error::InvalidExponent);
    }

    log::debug!(
        "generating {}-bit key ({:?} totient, {} rounds)",
        bit_size,
        config.totient,
        config.rounds
    );

    let prime_bits = bit_size / 2;
    let min_distance = BigUint::one() << (prime_bits - MIN_PRIME_DISTANCE_SLACK);
    let mut attempts = 0usize;

    'next: loop {
        attempts += 1;

        let p = rng.gen_prime_with_rounds(prime_bits, config.rounds);
        let q = rng.gen_prime_with_rounds(prime_bits, config.rounds);

        let distance = if p > q { &p - &q } else { &q - &p };
        if distance <= min_distance {
            log::debug!("primes too close to each other, regenerating");
            continue 'next;
        }

        let n = &p * &q;
        if n.bits() != bit_size {
            // gen_prime sets the top two bits of each prime, so this
            // should never happen.
            continue 'next;
        }

        let totient = config.totient.of(&p, &q);
        let d = match exp.clone().mod_inverse(&totient) {
            Some(d) => d,
            None => {
                log::debug!("public exponent not invertible modulo the totient, regenerating");
                continue 'next;
            }
        };

        log::debug!("key generated after {} attempt(s)", attempts);

        return Ok(RsaPrivateKeyComponents {
            n,
            e: exp.clone(),
            d,
            primes: vec![p, q],
        });
    }
}
