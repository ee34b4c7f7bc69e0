//! Supported padding schemes.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;

use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};

/// Padding scheme used for encryption.
pub trait PaddingScheme {
    /// Decrypt the given message using the given private key.
    ///
    /// If an `rng` is passed, it uses RSA blinding to help mitigate timing
    /// side-channel attacks.
    fn decrypt<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: Option<&mut Rng>,
        priv_key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Encrypt the given message using the given public key.
    fn encrypt<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>>;
}

/// Digital signature scheme.
pub trait SignatureScheme {
    /// Sign the given message.
    ///
    /// Hashing, if the scheme hashes at all, happens inside. `rng` blinds the
    /// private operation and supplies any salt.
    fn sign<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: &mut Rng,
        priv_key: &RsaPrivateKey,
        msg: &[u8],
    ) -> Result<Vec<u8>>;

    /// Verify a signed message.
    ///
    /// Returns `Ok(true)` for a valid signature and `Ok(false)` if the
    /// signature does not match `msg`. Errors are reserved for signatures
    /// that are not `k` bytes long or not below the modulus.
    fn verify(self, pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8]) -> Result<bool>;
}
