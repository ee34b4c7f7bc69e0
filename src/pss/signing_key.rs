use super::{Pss, Signature, VerifyingKey};
use crate::{Result, RsaPrivateKey};
use core::marker::PhantomData;
use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;
use signature::{Keypair, RandomizedSigner};
use zeroize::ZeroizeOnDrop;

/// Signing key for producing RSASSA-PSS signatures as described in
/// [RFC8017 § 8.1].
///
/// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
#[derive(Debug, Clone)]
pub struct SigningKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    inner: RsaPrivateKey,
    salt_len: usize,
    phantom: PhantomData<D>,
}

impl<D> SigningKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    /// Create a new RSASSA-PSS signing key.
    /// Digest output size is used as a salt length.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self::new_with_salt_len(key, <D as Digest>::output_size())
    }

    /// Create a new RSASSA-PSS signing key with a salt of the given length.
    pub fn new_with_salt_len(key: RsaPrivateKey, salt_len: usize) -> Self {
        Self {
            inner: key,
            salt_len,
            phantom: Default::default(),
        }
    }

    /// Generate a new random RSASSA-PSS signing key.
    /// Digest output size is used as a salt length.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
        Ok(Self::new(RsaPrivateKey::new(rng, bit_size)?))
    }

    /// Return specified salt length for this key
    pub fn salt_len(&self) -> usize {
        self.salt_len
    }
}

impl<D> RandomizedSigner<Signature> for SigningKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        let padding = Pss::new_with_salt::<D>(self.salt_len);
        let sig = self.inner.sign(rng, padding, msg)?;
        Ok(Signature::from(sig.into_boxed_slice()))
    }
}

impl<D> AsRef<RsaPrivateKey> for SigningKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn as_ref(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl<D> Keypair for SigningKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    type VerifyingKey = VerifyingKey<D>;

    fn verifying_key(&self) -> Self::VerifyingKey {
        VerifyingKey::new_with_salt_len(self.inner.to_public_key(), self.salt_len)
    }
}

impl<D> From<RsaPrivateKey> for SigningKey<D>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn from(key: RsaPrivateKey) -> Self {
        Self::new(key)
    }
}

impl<D> From<SigningKey<D>> for RsaPrivateKey
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    fn from(key: SigningKey<D>) -> Self {
        key.inner
    }
}

impl<D> ZeroizeOnDrop for SigningKey<D> where D: 'static + Digest + DynDigest + Send + Sync {}
