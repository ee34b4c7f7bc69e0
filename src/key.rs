//! RSA keys and key generation.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::generate_key;
use crate::dummy_rng::DummyRng;
use crate::errors::{Error, Result};
use crate::math::{lcm, ModInverse};
use crate::prime::DEFAULT_ROUNDS;
use crate::traits::{PaddingScheme, PrivateKeyParts, PublicKeyParts, SignatureScheme};

/// Smallest accepted public exponent.
const MIN_PUB_EXPONENT: u32 = 2;

/// Public exponent used unless configured otherwise.
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65_537;

/// Totient function from which the private exponent is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Totient {
    /// Carmichael's `λ(n) = lcm(p - 1, q - 1)`, giving the smallest private exponent.
    #[default]
    Carmichael,
    /// Euler's `φ(n) = (p - 1)(q - 1)`.
    Euler,
}

impl Totient {
    /// Evaluates the totient of `p * q`.
    pub fn of(&self, p: &BigUint, q: &BigUint) -> BigUint {
        let p1 = p - 1u32;
        let q1 = q - 1u32;
        match self {
            Totient::Carmichael => lcm(&p1, &q1),
            Totient::Euler => p1 * q1,
        }
    }
}

/// Parameters for key generation.
///
/// ```
/// use rsa_kit::{KeyGenConfig, Totient};
///
/// let config = KeyGenConfig::default()
///     .with_bits(3072)
///     .with_totient(Totient::Euler);
/// assert_eq!(config.bits, 3072);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Size of the modulus in bits; at least 512 and a multiple of 8.
    pub bits: usize,
    /// Totient used to derive the private exponent.
    pub totient: Totient,
    /// Public exponent; odd and at least 3.
    pub public_exponent: BigUint,
    /// Miller-Rabin rounds for every prime candidate.
    pub rounds: usize,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            bits: 2048,
            totient: Totient::default(),
            public_exponent: BigUint::from(DEFAULT_PUBLIC_EXPONENT),
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl KeyGenConfig {
    /// Sets the modulus size in bits.
    pub fn with_bits(mut self, bits: usize) -> Self {
        self.bits = bits;
        self
    }

    /// Sets the totient.
    pub fn with_totient(mut self, totient: Totient) -> Self {
        self.totient = totient;
        self
    }

    /// Sets the public exponent.
    pub fn with_public_exponent(mut self, exp: BigUint) -> Self {
        self.public_exponent = exp;
        self
    }

    /// Sets the number of Miller-Rabin rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }
}

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    ///
    /// Typically 0x10001 (65537)
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    pub(crate) d: BigUint,
    /// Prime factors of N, either empty or `[p, q]`.
    pub(crate) primes: Vec<BigUint>,
    /// precomputed values to speed up private operations
    pub(crate) precomputed: Option<PrecomputedValues>,
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.primes == other.primes
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.primes.zeroize();
        self.precomputed.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

/// CRT exponents and coefficient of a two-prime key.
#[derive(Debug, Clone)]
pub(crate) struct PrecomputedValues {
    /// D mod (P-1)
    pub(crate) dp: BigUint,
    /// D mod (Q-1)
    pub(crate) dq: BigUint,
    /// Q^-1 mod P
    pub(crate) qinv: BigUint,
}

impl Zeroize for PrecomputedValues {
    fn zeroize(&mut self) {
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for PrecomputedValues {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    ///
    /// The modulus must be positive and the exponent at least 2.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = Self { n, e };
        check_public(&k)?;
        Ok(k)
    }

    /// Encrypt the given message.
    ///
    /// The ciphertext is exactly as long as the modulus.
    pub fn encrypt<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: P,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        padding.encrypt(rng, self, msg)
    }

    /// Verify a signed message.
    ///
    /// Returns `Ok(false)` if the signature does not belong to `msg` under
    /// this key. Errors are reserved for signatures of the wrong length and
    /// values outside `[0, n)`.
    pub fn verify<S: SignatureScheme>(&self, scheme: S, msg: &[u8], sig: &[u8]) -> Result<bool> {
        scheme.verify(self, msg, sig)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size using the passed in `rng`.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_with_config(rng, &KeyGenConfig::default().with_bits(bit_size))
    }

    /// Generate a new RSA key pair as described by `config`.
    pub fn new_with_config<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        config: &KeyGenConfig,
    ) -> Result<RsaPrivateKey> {
        let components = generate_key(rng, config)?;
        RsaPrivateKey::from_components(
            components.n,
            components.e,
            components.d,
            components.primes,
        )
    }

    /// Constructs an RSA key pair from individual components.
    ///
    /// `primes` is either empty, in which case private operations use `d`
    /// directly, or the two factors of `n`, which enables the CRT.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        primes: Vec<BigUint>,
    ) -> Result<RsaPrivateKey> {
        if primes.len() != 0 && primes.len() != 2 {
            return Err(Error::InvalidPrime);
        }

        let mut k = RsaPrivateKey {
            pubkey_components: RsaPublicKey { n, e },
            d,
            primes,
            precomputed: None,
        };

        k.validate()?;
        k.precompute()?;

        Ok(k)
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` implements the `PublicKey` trait,
    /// but it can occasionally be useful to discard the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs some calculations to speed up private key operations.
    pub(crate) fn precompute(&mut self) -> Result<()> {
        if self.precomputed.is_some() || self.primes.len() != 2 {
            return Ok(());
        }

        let dp = &self.d % (&self.primes[0] - BigUint::one());
        let dq = &self.d % (&self.primes[1] - BigUint::one());
        let qinv = self.primes[1]
            .clone()
            .mod_inverse(&self.primes[0])
            .ok_or(Error::InvalidCoefficient)?;

        self.precomputed = Some(PrecomputedValues { dp, dq, qinv });

        Ok(())
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        if self.d.is_zero() {
            return Err(Error::InvalidExponent);
        }
        if self.primes.is_empty() {
            return Ok(());
        }

        // Check that Πprimes == n.
        let mut m = BigUint::one();
        for prime in &self.primes {
            // Any primes ≤ 1 will cause divide-by-zero panics later.
            if *prime <= BigUint::one() {
                return Err(Error::InvalidPrime);
            }
            m *= prime;
        }
        if &m != self.n() {
            return Err(Error::InvalidModulus);
        }

        // Check that de ≡ 1 mod p-1, for each prime.
        // This implies that e is coprime to each p-1 as e has a multiplicative
        // inverse. Therefore e is coprime to lcm(p-1,q-1) = λ(N).
        // It also implies that a^de ≡ a mod p as a^(p-1) ≡ 1 mod p. Thus a^de ≡ a
        // mod n for all a coprime to n, as required.
        let de = self.e() * &self.d;
        for prime in &self.primes {
            let congruence: BigUint = &de % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }

    /// Decrypt the given message.
    pub fn decrypt<P: PaddingScheme>(&self, padding: P, ciphertext: &[u8]) -> Result<Vec<u8>> {
        padding.decrypt(Option::<&mut DummyRng>::None, self, ciphertext)
    }

    /// Decrypt the given message.
    ///
    /// Uses `rng` to blind the decryption process.
    pub fn decrypt_blinded<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: P,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        padding.decrypt(Some(rng), self, ciphertext)
    }

    /// Sign the given message.
    ///
    /// The private operation is always blinded with `rng`; schemes with a
    /// random salt draw it from the same source.
    pub fn sign<R: CryptoRngCore + ?Sized, S: SignatureScheme>(
        &self,
        rng: &mut R,
        padding: S,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        padding.sign(rng, self, msg)
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn primes(&self) -> &[BigUint] {
        &self.primes
    }

    fn dp(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|p| &p.dp)
    }

    fn dq(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|p| &p.dq)
    }

    fn qinv(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|p| &p.qinv)
    }
}

/// A public key and the private key sharing its modulus.
///
/// Created atomically by key generation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl RsaKeyPair {
    /// Generate a key pair of `bit_size` bits with `e = 65537` and the
    /// Carmichael totient.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
        RsaPrivateKey::new(rng, bit_size).map(Self::from)
    }

    /// Generate a key pair as described by `config`.
    pub fn generate_with<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        config: &KeyGenConfig,
    ) -> Result<Self> {
        RsaPrivateKey::new_with_config(rng, config).map(Self::from)
    }

    /// The public half.
    pub fn public(&self) -> &RsaPublicKey {
        &self.public
    }

    /// The private half.
    pub fn private(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Splits the pair into its halves.
    pub fn into_parts(self) -> (RsaPublicKey, RsaPrivateKey) {
        (self.public, self.private)
    }
}

impl From<RsaPrivateKey> for RsaKeyPair {
    fn from(private: RsaPrivateKey) -> Self {
        Self {
            public: private.to_public_key(),
            private,
        }
    }
}

/// Check that the public key is well formed.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    if public_key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }

    if public_key.e() < &BigUint::from(MIN_PUB_EXPONENT) {
        return Err(Error::PublicExponentTooSmall);
    }

    Ok(())
}
