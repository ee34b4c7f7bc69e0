//! Property-based tests.

use num_bigint::{BigInt, BigUint, Sign};
use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa_kit::{
    math::{crt, egcd, gcd, lcm, mod_inverse, mod_pow, Congruence},
    prime::{is_probably_prime, miller_rabin, Primality},
    pss,
    signature::{Keypair, RandomizedSigner, SignatureEncoding, Verifier},
    Oaep, Pkcs1v15Encrypt, Pkcs1v15Sign, Pss, RsaPrivateKey,
};
use sha1::Sha1;
use sha2::Sha256;

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn private_key()(seed in any::<[u8; 32]>()) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::new(&mut rng, 512).unwrap()
    }
}

fn big(n: u64) -> BigUint {
    BigUint::from(n)
}

proptest! {
    #[test]
    fn mod_pow_matches_num_bigint(base in any::<u64>(), exp in any::<u64>(), m in 1u64..) {
        let (base, exp, m) = (big(base), big(exp), big(m));
        prop_assert_eq!(mod_pow(&base, &exp, &m), base.modpow(&exp, &m));
    }

    #[test]
    fn egcd_is_bezout(a in any::<u64>(), b in any::<u64>()) {
        let (g, x, y) = egcd(&big(a), &big(b));
        prop_assert_eq!(&g, &gcd(&big(a), &big(b)));

        let lhs = BigInt::from(a) * x + BigInt::from(b) * y;
        prop_assert_eq!(lhs, BigInt::from_biguint(Sign::Plus, g));
    }

    #[test]
    fn gcd_times_lcm(a in 1u64.., b in 1u64..) {
        let (a, b) = (big(a), big(b));
        prop_assert_eq!(gcd(&a, &b) * lcm(&a, &b), &a * &b);
    }

    #[test]
    fn mod_inverse_exists_iff_coprime(a in any::<u64>(), n in 2u64..) {
        let (a, n) = (big(a), big(n));
        match mod_inverse(&a, &n) {
            Some(inverse) => prop_assert_eq!((&a * &inverse.base) % &n, big(1)),
            None => prop_assert_ne!(gcd(&a, &n), big(1)),
        }
    }

    #[test]
    fn crt_solves_every_congruence(x in any::<u64>()) {
        let moduli = [big(7), big(11), big(13), big(64)];
        let system: Vec<_> = moduli
            .iter()
            .map(|m| Congruence::new(big(x) % m, m.clone()))
            .collect();
        let solution = crt(&system).unwrap();
        prop_assert_eq!(&solution.modulus, &big(7 * 11 * 13 * 64));
        prop_assert_eq!(solution.base, big(x) % big(7 * 11 * 13 * 64));
    }

    #[test]
    fn small_primes_agree_with_trial_division(n in 2u64..100_000, seed in any::<[u8; 32]>()) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let expected = (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0);
        prop_assert_eq!(is_probably_prime(&mut rng, &big(n), 20).is_probably_prime(), expected);
        if n > 3 && n % 2 == 1 {
            let verdict = miller_rabin(&mut rng, &big(n), 20);
            prop_assert_eq!(verdict == Primality::ProbablyPrime, expected);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn pkcs1v15_encrypt_roundtrip(private_key in private_key(), msg in proptest::collection::vec(any::<u8>(), 0..53)) {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let public_key = private_key.to_public_key();
        let ciphertext = public_key.encrypt(&mut rng, Pkcs1v15Encrypt, &msg).unwrap();
        prop_assert_eq!(private_key.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap(), msg);
    }

    #[test]
    fn oaep_encrypt_roundtrip(private_key in private_key(), msg in proptest::collection::vec(any::<u8>(), 0..22)) {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let public_key = private_key.to_public_key();
        let ciphertext = public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), &msg).unwrap();
        prop_assert_eq!(private_key.decrypt(Oaep::new::<Sha1>(), &ciphertext).unwrap(), msg);
    }

    #[test]
    fn pkcs1v15_sign_roundtrip(private_key in private_key(), msg in any::<Vec<u8>>()) {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let public_key = private_key.to_public_key();
        let sig = private_key.sign(&mut rng, Pkcs1v15Sign::new::<Sha256>(), &msg).unwrap();
        prop_assert_eq!(public_key.verify(Pkcs1v15Sign::new::<Sha256>(), &msg, &sig), Ok(true));
    }

    #[test]
    fn pss_sign_roundtrip(private_key in private_key(), msg in any::<Vec<u8>>()) {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        // 512-bit modulus leaves no room for a 32-byte hash and a 32-byte salt
        let signing_key = pss::SigningKey::<Sha1>::new(private_key);
        let signature_bytes = signing_key.sign_with_rng(&mut rng, &msg).to_bytes();

        let verifying_key = signing_key.verifying_key();
        let signature = pss::Signature::try_from(&*signature_bytes).unwrap();
        prop_assert!(verifying_key.verify(&msg, &signature).is_ok());
    }

    #[test]
    fn pss_bit_flip_fails(private_key in private_key(), msg in any::<Vec<u8>>(), bit in 0usize..512) {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let public_key = private_key.to_public_key();
        let mut sig = private_key.sign(&mut rng, Pss::new::<Sha1>(), &msg).unwrap();
        sig[bit / 8] ^= 1 << (bit % 8);
        prop_assert_ne!(public_key.verify(Pss::new::<Sha1>(), &msg, &sig), Ok(true));
    }
}
