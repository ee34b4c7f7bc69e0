//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#oaep-encryption).

mod decrypting_key;
mod encrypting_key;

pub use self::{decrypting_key::DecryptingKey, encrypting_key::EncryptingKey};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;

use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::padding::EncryptionPadding;
use crate::traits::PaddingScheme;

/// Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
///
/// - `digest` is used to hash the label. The maximum possible plaintext length is `m = k - 2 * h_len - 2`,
///   where `k` is the size of the RSA modulus.
/// - `mgf_digest` specifies the hash function that is used in the [MGF1](https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2).
/// - `label` is optional data that can be associated with the message.
///
/// The two hash functions can, but don't need to be the same.
///
/// A prominent example is the [`AndroidKeyStore`](https://developer.android.com/guide/topics/security/cryptography#oaep-mgf1-digest).
/// It uses SHA-1 for `mgf_digest` and a user-chosen SHA flavour for `digest`.
pub struct Oaep {
    /// Digest type to use.
    pub digest: Box<dyn DynDigest + Send + Sync>,

    /// Digest to use for Mask Generation Function (MGF).
    pub mgf_digest: Box<dyn DynDigest + Send + Sync>,

    /// Optional label.
    pub label: Option<Box<[u8]>>,
}

impl Oaep {
    /// Create a new OAEP `PaddingScheme`, using `T` as the hash function for both the default (empty) label and for MGF1.
    ///
    /// # Example
    /// ```
    /// use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    /// use rsa_kit::{Oaep, RsaPrivateKey, RsaPublicKey};
    /// use sha1::Sha1;
    ///
    /// let mut rng = ChaCha8Rng::from_seed([42; 32]);
    /// let private_key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
    /// let public_key = RsaPublicKey::from(&private_key);
    ///
    /// let encrypted_data = public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), b"secret").unwrap();
    /// let decrypted_data = private_key.decrypt(Oaep::new::<Sha1>(), &encrypted_data).unwrap();
    /// assert_eq!(decrypted_data, b"secret");
    /// ```
    pub fn new<T: 'static + Digest + DynDigest + Send + Sync>() -> Self {
        Self {
            digest: Box::new(<T as Digest>::new()),
            mgf_digest: Box::new(<T as Digest>::new()),
            label: None,
        }
    }

    /// Create a new OAEP `PaddingScheme` with an associated `label`, using `T` as the hash function for both the label and for MGF1.
    pub fn new_with_label<T: 'static + Digest + DynDigest + Send + Sync, S: Into<Box<[u8]>>>(
        label: S,
    ) -> Self {
        Self {
            digest: Box::new(<T as Digest>::new()),
            mgf_digest: Box::new(<T as Digest>::new()),
            label: Some(label.into()),
        }
    }

    /// Create a new OAEP `PaddingScheme`, using `T` as the hash function for the default (empty) label, and `U` as the hash function for MGF1.
    /// If a label is needed use [`Oaep::new_with_label`] or [`Oaep::new_with_mgf_hash_and_label`].
    pub fn new_with_mgf_hash<
        T: 'static + Digest + DynDigest + Send + Sync,
        U: 'static + Digest + DynDigest + Send + Sync,
    >() -> Self {
        Self {
            digest: Box::new(<T as Digest>::new()),
            mgf_digest: Box::new(<U as Digest>::new()),
            label: None,
        }
    }

    /// Create a new OAEP `PaddingScheme` with an associated `label`, using `T` as the hash function for the label, and `U` as the hash function for MGF1.
    pub fn new_with_mgf_hash_and_label<
        T: 'static + Digest + DynDigest + Send + Sync,
        U: 'static + Digest + DynDigest + Send + Sync,
        S: Into<Box<[u8]>>,
    >(
        label: S,
    ) -> Self {
        Self {
            digest: Box::new(<T as Digest>::new()),
            mgf_digest: Box::new(<U as Digest>::new()),
            label: Some(label.into()),
        }
    }
}

impl PaddingScheme for Oaep {
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

impl fmt::Debug for Oaep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAEP")
            .field("digest", &"...")
            .field("mgf_digest", &"...")
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, OaepPaddingError};
    use crate::traits::{
        Decryptor, EncryptingKeypair, PublicKeyParts, RandomizedDecryptor, RandomizedEncryptor,
    };
    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use sha1::Sha1;
    use sha2::{Sha224, Sha256, Sha384, Sha512};

    /// 1536 bits leave room for 56-byte messages under SHA-512.
    fn get_private_key() -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        RsaPrivateKey::new(&mut rng, 1536).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_oaep() {
        let priv_key = get_private_key();
        do_test_encrypt_decrypt_oaep::<Sha1>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha224>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha256>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha384>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha512>(&priv_key);
    }

    fn get_label(rng: &mut ChaCha8Rng) -> Option<Box<[u8]>> {
        const GEN_ASCII_STR_CHARSET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
            abcdefghijklmnopqrstuvwxyz\
            0123456789=+";

        let mut buf = [0u8; 32];
        rng.fill_bytes(&mut buf);
        if buf[0] < (1 << 7) {
            for v in buf.iter_mut() {
                *v = GEN_ASCII_STR_CHARSET[(*v >> 2) as usize];
            }
            Some(buf.to_vec().into_boxed_slice())
        } else {
            None
        }
    }

    fn do_test_encrypt_decrypt_oaep<D: 'static + Digest + DynDigest + Send + Sync>(
        prk: &RsaPrivateKey,
    ) {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);

        let k = prk.size();

        for i in 1..8 {
            let mut input = vec![0u8; i * 8];
            rng.fill_bytes(&mut input);

            let max = k - 2 * <D as Digest>::output_size() - 2;
            if input.len() > max {
                input = input[0..max].to_vec();
            }
            let label = get_label(&mut rng);

            let pub_key: RsaPublicKey = prk.into();

            let ciphertext = if let Some(ref label) = label {
                let padding = Oaep::new_with_label::<D, _>(label.clone());
                pub_key.encrypt(&mut rng, padding, &input).unwrap()
            } else {
                pub_key.encrypt(&mut rng, Oaep::new::<D>(), &input).unwrap()
            };

            assert_ne!(input, ciphertext);
            let blind: bool = rng.next_u32() < (1 << 31);

            let padding = if let Some(label) = label {
                Oaep::new_with_label::<D, _>(label)
            } else {
                Oaep::new::<D>()
            };

            let plaintext = if blind {
                prk.decrypt_blinded(&mut rng, padding, &ciphertext).unwrap()
            } else {
                prk.decrypt(padding, &ciphertext).unwrap()
            };

            assert_eq!(input, plaintext);
        }
    }

    #[test]
    fn test_decrypt_oaep_invalid_hash() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();
        let ciphertext = pub_key
            .encrypt(&mut rng, Oaep::new::<Sha1>(), "a_plain_text".as_bytes())
            .unwrap();
        assert!(
            ciphertext.len() == priv_key.size(),
            "cipher text length must equal the modulus size"
        );
        let decrypted = priv_key.decrypt_blinded(
            &mut rng,
            Oaep::new_with_label::<Sha1, _>("label".as_bytes()),
            &ciphertext,
        );
        assert_eq!(
            decrypted,
            Err(Error::OaepPadding(OaepPaddingError::LabelHash))
        );
        assert!(decrypted.unwrap_err().is_padding_error());
    }

    #[test]
    fn test_mgf_hash_differs_from_label_hash() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key = get_private_key();
        let pub_key = priv_key.to_public_key();

        let ciphertext = pub_key
            .encrypt(
                &mut rng,
                Oaep::new_with_mgf_hash_and_label::<Sha256, Sha1, _>(&b"label"[..]),
                b"android keystore",
            )
            .unwrap();
        let plaintext = priv_key
            .decrypt(
                Oaep::new_with_mgf_hash_and_label::<Sha256, Sha1, _>(&b"label"[..]),
                &ciphertext,
            )
            .unwrap();
        assert_eq!(plaintext, b"android keystore");

        // the same label hash with the wrong mask generator garbles the block
        assert!(priv_key
            .decrypt(
                Oaep::new_with_mgf_hash_and_label::<Sha256, Sha256, _>(&b"label"[..]),
                &ciphertext,
            )
            .unwrap_err()
            .is_padding_error());
    }

    #[test]
    fn test_capacity_boundary() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pub_key = get_private_key().to_public_key();
        let k = pub_key.size();

        assert!(pub_key
            .encrypt(&mut rng, Oaep::new::<Sha1>(), &vec![7u8; k - 42])
            .is_ok());
        assert_eq!(
            pub_key.encrypt(&mut rng, Oaep::new::<Sha1>(), &vec![7u8; k - 41]),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_encrypt_decrypt_oaep_traits() {
        let priv_key = get_private_key();
        do_test_oaep_with_traits(&DecryptingKey::<Sha1>::new(priv_key.clone()));
        do_test_oaep_with_traits(&DecryptingKey::<Sha256>::new_with_label(
            priv_key.clone(),
            &b"label"[..],
        ));
        do_test_oaep_with_traits(&DecryptingKey::<Sha512, Sha1>::new(priv_key));
    }

    fn do_test_oaep_with_traits<D, MGD>(decrypting_key: &DecryptingKey<D, MGD>)
    where
        D: 'static + Digest + DynDigest + Send + Sync,
        MGD: 'static + Digest + DynDigest + Send + Sync,
    {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let encrypting_key = decrypting_key.encrypting_key();

        for i in 1..8 {
            let mut input = vec![0u8; i * 8];
            rng.fill_bytes(&mut input);

            let ciphertext = encrypting_key.encrypt_with_rng(&mut rng, &input).unwrap();
            assert_ne!(input, ciphertext);

            let blind: bool = rng.next_u32() < (1 << 31);
            let plaintext = if blind {
                decrypting_key
                    .decrypt_with_rng(&mut rng, &ciphertext)
                    .unwrap()
            } else {
                decrypting_key.decrypt(&ciphertext).unwrap()
            };

            assert_eq!(input, plaintext);
        }
    }
}
