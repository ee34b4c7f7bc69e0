//! PKCS#1 v1.5 support as described in [RFC8017 § 8.2].
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#pkcs1-v15-signatures).
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::{boxed::Box, vec::Vec};
use const_oid::AssociatedOid;
use core::fmt;
use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;

use crate::algorithms::pkcs1v15::pkcs1v15_generate_prefix;
use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::padding::{EncryptionPadding, SignaturePadding};
use crate::traits::{PaddingScheme, SignatureScheme};

/// Encryption using PKCS#1 v1.5 padding with eight filler bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pkcs1v15Encrypt;

impl PaddingScheme for Pkcs1v15Encrypt {
    fn decrypt<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: Option<&mut Rng>,
        priv_key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        EncryptionPadding::from(self).decrypt(rng, priv_key, ciphertext)
    }

    fn encrypt<Rng: CryptoRngCore + ?Sized>(
        self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        EncryptionPadding::from(self).encrypt(rng, pub_key, msg)
    }
}

/// `RSASSA-PKCS1-v1_5`: digital signatures using PKCS#1 v1.5 padding.
pub struct Pkcs1v15Sign {
    /// Digest applied to the message.
    pub digest: Box<dyn DynDigest + Send + Sync>,

    /// DER `DigestInfo` header in front of the hash.
    pub prefix: Box<[u8]>,
}

impl Pkcs1v15Sign {
    /// Create new PKCS#1 v1.5 padding for the given digest.
    ///
    /// The digest must have an [`AssociatedOid`]. Make sure to enable the `oid`
    /// feature of the relevant digest crate.
    pub fn new<D>() -> Self
    where
        D: 'static + Digest + DynDigest + AssociatedOid + Send + Sync,
    {
        Self {
            digest: Box::new(<D as Digest>::new()),
            prefix: pkcs1v15_generate_prefix::<D>().into_boxed_slice(),
        }
    }
}

impl SignatureScheme for Pkcs1v15Sign {
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

impl fmt::Debug for Pkcs1v15Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pkcs1v15Sign")
            .field("digest", &"...")
            .field("prefix", &self.prefix)
            .finish()
    }
}
