use super::Oaep;
use crate::{traits::RandomizedEncryptor, Result, RsaPublicKey};
use alloc::{boxed::Box, vec::Vec};
use core::fmt;
use core::marker::PhantomData;
use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;

/// Encryption key for OAEP encryption as described in [RFC8017 § 7.1].
///
/// `D` hashes the label, `MGD` drives MGF1.
///
/// [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
pub struct EncryptingKey<D, MGD = D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    inner: RsaPublicKey,
    label: Option<Box<[u8]>>,
    phantom: PhantomData<D>,
    mg_phantom: PhantomData<MGD>,
}

impl<D, MGD> EncryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    /// Create a new encrypting key from an RSA public key.
    pub fn new(key: RsaPublicKey) -> Self {
        Self {
            inner: key,
            label: None,
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }

    /// Create a new encrypting key from an RSA public key using provided label
    pub fn new_with_label<S: Into<Box<[u8]>>>(key: RsaPublicKey, label: S) -> Self {
        Self {
            inner: key,
            label: Some(label.into()),
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }

    pub(crate) fn padding(label: &Option<Box<[u8]>>) -> Oaep {
        Oaep {
            digest: Box::new(<D as Digest>::new()),
            mgf_digest: Box::new(<MGD as Digest>::new()),
            label: label.clone(),
        }
    }
}

impl<D, MGD> RandomizedEncryptor for EncryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn encrypt_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        self.inner.encrypt(rng, Self::padding(&self.label), msg)
    }
}

impl<D, MGD> Clone for EncryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            label: self.label.clone(),
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }
}

impl<D, MGD> fmt::Debug for EncryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptingKey")
            .field("inner", &self.inner)
            .field("label", &self.label)
            .finish()
    }
}

impl<D, MGD> PartialEq for EncryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.label == other.label
    }
}
