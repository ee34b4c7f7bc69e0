use super::EncryptingKey;
use crate::{
    traits::{Decryptor, EncryptingKeypair, RandomizedDecryptor},
    Result, RsaPrivateKey,
};
use alloc::{boxed::Box, vec::Vec};
use core::fmt;
use core::marker::PhantomData;
use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;
use zeroize::ZeroizeOnDrop;

/// Decryption key for OAEP decryption as described in [RFC8017 § 7.1].
///
/// [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
pub struct DecryptingKey<D, MGD = D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    inner: RsaPrivateKey,
    label: Option<Box<[u8]>>,
    phantom: PhantomData<D>,
    mg_phantom: PhantomData<MGD>,
}

impl<D, MGD> DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    /// Create a new decrypting key from an RSA private key.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            inner: key,
            label: None,
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }

    /// Create a new decrypting key from an RSA private key using provided label
    pub fn new_with_label<S: Into<Box<[u8]>>>(key: RsaPrivateKey, label: S) -> Self {
        Self {
            inner: key,
            label: Some(label.into()),
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }
}

impl<D, MGD> Decryptor for DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let padding = EncryptingKey::<D, MGD>::padding(&self.label);
        self.inner.decrypt(padding, ciphertext)
    }
}

impl<D, MGD> RandomizedDecryptor for DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn decrypt_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let padding = EncryptingKey::<D, MGD>::padding(&self.label);
        self.inner.decrypt_blinded(rng, padding, ciphertext)
    }
}

impl<D, MGD> EncryptingKeypair for DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    type EncryptingKey = EncryptingKey<D, MGD>;

    fn encrypting_key(&self) -> EncryptingKey<D, MGD> {
        match &self.label {
            Some(label) => EncryptingKey::new_with_label(self.inner.to_public_key(), label.clone()),
            None => EncryptingKey::new(self.inner.to_public_key()),
        }
    }
}

impl<D, MGD> ZeroizeOnDrop for DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
}

impl<D, MGD> fmt::Debug for DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("inner", &self.inner)
            .field("label", &self.label)
            .finish()
    }
}

impl<D, MGD> PartialEq for DecryptingKey<D, MGD>
where
    D: 'static + Digest + DynDigest + Send + Sync,
    MGD: 'static + Digest + DynDigest + Send + Sync,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.label == other.label
    }
}
