//! Support for the [Probabilistic Signature Scheme] (PSS) a.k.a. RSASSA-PSS.
//!
//! Designed by Mihir Bellare and Phillip Rogaway. Specified in [RFC8017 § 8.1].
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#pss-signatures).
//!
//! [Probabilistic Signature Scheme]: https://en.wikipedia.org/wiki/Probabilistic_signature_scheme
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

mod signature;
mod signing_key;
mod verifying_key;

pub use self::{signature::Signature, signing_key::SigningKey, verifying_key::VerifyingKey};

use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Debug};

use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;

use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::padding::SignaturePadding;
use crate::traits::SignatureScheme;

/// Digital signatures using PSS padding.
pub struct Pss {
    /// Digest type to use.
    pub digest: Box<dyn DynDigest + Send + Sync>,

    /// Salt length.
    pub salt_len: usize,
}

impl Pss {
    /// New PSS padding for the given digest.
    /// Digest output size is used as a salt length.
    pub fn new<T: 'static + Digest + DynDigest + Send + Sync>() -> Self {
        Self::new_with_salt::<T>(<T as Digest>::output_size())
    }

    /// New PSS padding for the given digest with a salt value of the given length.
    pub fn new_with_salt<T: 'static + Digest + DynDigest + Send + Sync>(len: usize) -> Self {
        Pss {
            digest: Box::new(<T as Digest>::new()),
            salt_len: len,
        }
    }
}

impl SignatureScheme for Pss {
    fn sign<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: &mut Rng,
        priv_key: &RsaPrivateKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        SignaturePadding::from(self).sign(rng, priv_key, msg)
    }

    fn verify(self, pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8]) -> Result<bool> {
        SignaturePadding::from(self).verify(pub_key, msg, sig)
    }
}

impl Debug for Pss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PSS")
            .field("digest", &"...")
            .field("salt_len", &self.salt_len)
            .finish()
    }
}
