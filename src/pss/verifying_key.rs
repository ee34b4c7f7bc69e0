use super::{Pss, Signature};
use crate::RsaPublicKey;
use core::marker::PhantomData;
use digest::{Digest, DynDigest};
use signature::Verifier;

/// Verifying key for checking the validity of RSASSA-PSS signatures as
/// described in [RFC8017 § 8.1].
///
/// The salt length is fixed per key; signatures made with another salt
/// length do not verify.
///
/// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
#[derive(Debug)]
pub struct VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    pub(super) inner: RsaPublicKey,
    pub(super) salt_len: usize,
    pub(super) phantom: PhantomData<D>,
}

impl<D> VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    /// Create a new RSASSA-PSS verifying key.
    /// Digest output size is used as a salt length.
    pub fn new(key: RsaPublicKey) -> Self {
        Self::new_with_salt_len(key, <D as Digest>::output_size())
    }

    /// Create a new RSASSA-PSS verifying key.
    pub fn new_with_salt_len(key: RsaPublicKey, salt_len: usize) -> Self {
        Self {
            inner: key,
            salt_len,
            phantom: Default::default(),
        }
    }

    /// Return specified salt length for this key
    pub fn salt_len(&self) -> usize {
        self.salt_len
    }
}

impl<D> Verifier<Signature> for VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        let padding = Pss::new_with_salt::<D>(self.salt_len);
        match self.inner.verify(padding, msg, &signature.inner) {
            Ok(true) => Ok(()),
            Ok(false) => Err(signature::Error::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl<D> AsRef<RsaPublicKey> for VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn as_ref(&self) -> &RsaPublicKey {
        &self.inner
    }
}

// Implemented manually so that `D` does not have to be `Clone`.
impl<D> Clone for VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            salt_len: self.salt_len,
            phantom: Default::default(),
        }
    }
}

impl<D> PartialEq for VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.salt_len == other.salt_len
    }
}

impl<D> From<RsaPublicKey> for VerifyingKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn from(key: RsaPublicKey) -> Self {
        Self::new(key)
    }
}

impl<D> From<VerifyingKey<D>> for RsaPublicKey
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn from(key: VerifyingKey<D>) -> Self {
        key.inner
    }
}
