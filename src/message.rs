//! Messages given either as integers or as byte strings.
//!
//! Every operation hands its result back in the representation of its
//! input. Integer inputs are converted with the minimal big-endian encoding
//! before padding; integer ciphertexts and signatures must lie below the
//! modulus and are widened to the modulus size before decoding.

use alloc::vec::Vec;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::pad::{bytes_to_int, int_to_bytes};
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::{PaddingScheme, PublicKeyParts, SignatureScheme};

/// A message, ciphertext or signature in either representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Message {
    /// A non-negative integer.
    Int(BigUint),
    /// A big-endian byte string.
    Bytes(Vec<u8>),
}

impl Message {
    /// Returns the big-endian bytes of the message; minimal for `Int`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            // only fails when a target length is given
            Message::Int(value) => int_to_bytes(value, None).unwrap_or_default(),
            Message::Bytes(bytes) => bytes.clone(),
        }
    }

    /// Returns the integer value of the message.
    pub fn to_int(&self) -> BigUint {
        match self {
            Message::Int(value) => value.clone(),
            Message::Bytes(bytes) => bytes_to_int(bytes),
        }
    }

    /// Whether the message is given as an integer.
    pub fn is_int(&self) -> bool {
        matches!(self, Message::Int(_))
    }

    /// Bytes of a ciphertext or signature, widened to `k` bytes if given as
    /// an integer.
    fn to_block(&self, key: &RsaPublicKey) -> Result<Vec<u8>> {
        match self {
            Message::Int(value) => {
                if value >= key.n() {
                    return Err(Error::MessageOutOfRange);
                }
                int_to_bytes(value, Some(key.size()))
            }
            Message::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Wraps `bytes` in the representation of `self`.
    fn same_kind(&self, bytes: Vec<u8>) -> Message {
        match self {
            Message::Int(_) => Message::Int(bytes_to_int(&bytes)),
            Message::Bytes(_) => Message::Bytes(bytes),
        }
    }
}

impl From<BigUint> for Message {
    fn from(value: BigUint) -> Self {
        Message::Int(value)
    }
}

impl From<Vec<u8>> for Message {
    fn from(bytes: Vec<u8>) -> Self {
        Message::Bytes(bytes)
    }
}

impl From<&[u8]> for Message {
    fn from(bytes: &[u8]) -> Self {
        Message::Bytes(bytes.to_vec())
    }
}

impl RsaPublicKey {
    /// Encrypt a message in either representation.
    ///
    /// A `Bytes` ciphertext is exactly as long as the modulus.
    pub fn encrypt_message<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: P,
        msg: &Message,
    ) -> Result<Message> {
        let ciphertext = self.encrypt(rng, padding, &msg.to_bytes())?;
        Ok(msg.same_kind(ciphertext))
    }

    /// Verify a signature over a message, each in either representation.
    pub fn verify_message<S: SignatureScheme>(
        &self,
        padding: S,
        msg: &Message,
        sig: &Message,
    ) -> Result<bool> {
        let sig = sig.to_block(self)?;
        self.verify(padding, &msg.to_bytes(), &sig)
    }
}

impl RsaPrivateKey {
    /// Decrypt a ciphertext in either representation.
    pub fn decrypt_message<P: PaddingScheme>(
        &self,
        padding: P,
        ciphertext: &Message,
    ) -> Result<Message> {
        let block = ciphertext.to_block(self.as_ref())?;
        let plaintext = self.decrypt(padding, &block)?;
        Ok(ciphertext.same_kind(plaintext))
    }

    /// Sign a message in either representation.
    ///
    /// A `Bytes` signature is exactly as long as the modulus.
    pub fn sign_message<R: CryptoRngCore + ?Sized, S: SignatureScheme>(
        &self,
        rng: &mut R,
        padding: S,
        msg: &Message,
    ) -> Result<Message> {
        let sig = self.sign(rng, padding, &msg.to_bytes())?;
        Ok(msg.same_kind(sig))
    }
}
