//! Generic RSA implementation

use alloc::borrow::Cow;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::math::{mod_pow, ModInverse};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// Fails with [`Error::MessageOutOfRange`] unless `m < n`.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::MessageOutOfRange);
    }
    Ok(mod_pow(m, key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<R: CryptoRngCore + ?Sized, K: PrivateKeyParts + ?Sized>(
    mut rng: Option<&mut R>,
    priv_key: &K,
    c: &BigUint,
) -> Result<BigUint> {
    if priv_key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }
    if c >= priv_key.n() {
        return Err(Error::MessageOutOfRange);
    }

    let mut ir = None;

    let c = if let Some(ref mut rng) = rng {
        let (blinded, unblinder) = blind(rng, priv_key, c);
        ir = Some(unblinder);
        Cow::Owned(blinded)
    } else {
        Cow::Borrowed(c)
    };

    let m = match (priv_key.dp(), priv_key.dq(), priv_key.qinv()) {
        (Some(dp), Some(dq), Some(qinv)) => {
            // We have the precalculated values needed for the CRT.
            let p = &priv_key.primes()[0];
            let q = &priv_key.primes()[1];

            let m1 = Zeroizing::new(mod_pow(&c, dp, p));
            let m2 = Zeroizing::new(mod_pow(&c, dq, q));

            // Garner: h = qinv * (m1 - m2) mod p, m = m2 + h * q
            let m2_mod_p = Zeroizing::new(&*m2 % p);
            let diff = Zeroizing::new((&*m1 + p - &*m2_mod_p) % p);
            let h = Zeroizing::new((qinv * &*diff) % p);

            &*m2 + &*h * q
        }
        _ => mod_pow(&c, priv_key.d(), priv_key.n()),
    };

    match ir {
        Some(mut ir) => {
            // unblind
            let m = unblind(priv_key, &m, &ir);
            ir.zeroize();
            Ok(m)
        }
        None => Ok(m),
    }
}

/// ⚠️ Performs raw RSA decryption with no padding.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.  This will also
/// check for errors in the CRT computation.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized, K: PrivateKeyParts + ?Sized>(
    priv_key: &K,
    rng: Option<&mut R>,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts + ?Sized>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let unblinder;
    loop {
        r = rng.gen_biguint_below(key.n());
        if r.is_zero() {
            r = BigUint::one();
        }
        if let Some(ir) = r.clone().mod_inverse(key.n()) {
            unblinder = ir;
            break;
        }
    }

    let c = {
        let mut rpowe = mod_pow(&r, key.e(), key.n()); // N != 0
        let mut c = c * &rpowe;
        c %= key.n();

        rpowe.zeroize();

        c
    };
    r.zeroize();

    (c, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_rng::DummyRng;
    use crate::{RsaPrivateKey, RsaPublicKey};
    use num_traits::FromPrimitive;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn big(n: u64) -> BigUint {
        BigUint::from_u64(n).unwrap()
    }

    /// p = 61, q = 53, n = 3233, e = 17, d = 413 (Carmichael totient 780)
    fn textbook_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(big(3233), big(17), big(413), vec![big(61), big(53)])
            .unwrap()
    }

    #[test]
    fn test_textbook_round_trip() {
        let key = textbook_key();
        let c = rsa_encrypt(&key, &big(65)).unwrap();
        assert_eq!(c, big(2790));
        assert_eq!(rsa_decrypt::<DummyRng, _>(None, &key, &c).unwrap(), big(65));
    }

    #[test]
    fn test_crt_matches_plain_exponentiation() {
        let key = textbook_key();
        let public = RsaPublicKey::new(big(3233), big(17)).unwrap();
        let plain = RsaPrivateKey::from_components(big(3233), big(17), big(413), vec![]).unwrap();
        let mut rng = ChaCha8Rng::from_seed([42; 32]);

        for m in 0..3233u64 {
            let c = rsa_encrypt(&public, &big(m)).unwrap();
            let with_crt = rsa_decrypt::<DummyRng, _>(None, &key, &c).unwrap();
            let without = rsa_decrypt::<DummyRng, _>(None, &plain, &c).unwrap();
            let blinded = rsa_decrypt_and_check(&key, Some(&mut rng), &c).unwrap();
            assert_eq!(with_crt, big(m));
            assert_eq!(without, big(m));
            assert_eq!(blinded, big(m));
        }
    }

    #[test]
    fn test_domain_check() {
        let key = textbook_key();
        assert_eq!(rsa_encrypt(&key, &big(3233)), Err(Error::MessageOutOfRange));
        assert_eq!(
            rsa_decrypt::<DummyRng, _>(None, &key, &big(5000)),
            Err(Error::MessageOutOfRange)
        );
    }
}
