//! Padding modes selectable at runtime.
//!
//! [`EncryptionPadding`] and [`SignaturePadding`] are closed sets of the
//! supported modes. Every scheme struct ([`Oaep`], [`Pss`], ...) converts
//! into one of them, so encryption, decryption, signing and verification each
//! run through a single pipeline:
//!
//! ```text
//! encrypt: pad -> bytes_to_int -> m^e mod n -> k bytes
//! decrypt: k bytes -> c^d mod n (CRT, checked) -> k bytes -> unpad
//! sign:    encode -> bytes_to_int -> m^d mod n (blinded, checked) -> k bytes
//! verify:  k bytes -> s^e mod n -> k bytes -> verify_encoded
//! ```

use alloc::vec::Vec;
use core::str::FromStr;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::algorithms::oaep::{oaep_decrypt_unpad, oaep_encrypt_pad};
use crate::algorithms::pad::{bytes_to_int, int_to_bytes, uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::pkcs1v15::{
    pkcs1v15_encrypt_block, pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad, pkcs1v15_sign_pad,
    pkcs1v15_sign_unpad,
};
use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::oaep::Oaep;
use crate::pkcs1v15::{Pkcs1v15Encrypt, Pkcs1v15Sign};
use crate::pss::Pss;
use crate::traits::{PaddingScheme, PublicKeyParts, SignatureScheme};

/// Padding applied to a message before encryption.
#[derive(Debug)]
pub enum EncryptionPadding {
    /// `0x00 0x02 <8 nonzero bytes> 0x00 M`.
    Pkcs1v15(Pkcs1v15Encrypt),
    /// RSAES-OAEP.
    Oaep(Oaep),
    /// Textbook RSA: the message bytes are the integer.
    None,
}

impl EncryptionPadding {
    /// Pads `msg` for a modulus of `k` bytes.
    ///
    /// The result is at most `k` bytes long; `EncryptionPadding::None`
    /// returns the message itself.
    pub fn pad<R: CryptoRngCore + ?Sized>(
        &mut self,
        rng: &mut R,
        msg: &[u8],
        k: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            EncryptionPadding::Pkcs1v15(_) => pkcs1v15_encrypt_pad(rng, msg, k),
            EncryptionPadding::Oaep(oaep) => oaep_encrypt_pad(
                rng,
                msg,
                &mut *oaep.digest,
                &mut *oaep.mgf_digest,
                oaep.label.as_deref(),
                k,
            ),
            EncryptionPadding::None => Ok(Zeroizing::new(msg.to_vec())),
        }
    }

    /// Recovers the message from a decrypted block of `k` bytes.
    ///
    /// `EncryptionPadding::None` returns the minimal big-endian encoding of
    /// the block, so leading zero bytes of the original message are lost.
    pub fn unpad(&mut self, block: &mut [u8], k: usize) -> Result<Vec<u8>> {
        match self {
            EncryptionPadding::Pkcs1v15(_) => pkcs1v15_encrypt_unpad(pkcs1v15_encrypt_block(block)),
            EncryptionPadding::Oaep(oaep) => oaep_decrypt_unpad(
                block,
                &mut *oaep.digest,
                &mut *oaep.mgf_digest,
                oaep.label.as_deref(),
                k,
            ),
            EncryptionPadding::None => int_to_bytes(&bytes_to_int(block), None),
        }
    }
}

impl PaddingScheme for EncryptionPadding {
    fn decrypt<Rng: CryptoRngCore + ?Sized>(
        mut self,
        rng: Option<&mut Rng>,
        priv_key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        let k = priv_key.size();
        if ciphertext.len() != k {
            return Err(Error::InputLength {
                expected: k,
                actual: ciphertext.len(),
            });
        }

        let c = BigUint::from_bytes_be(ciphertext);
        let m = rsa_decrypt_and_check(priv_key, rng, &c)?;
        let mut block = uint_to_zeroizing_be_pad(m, k)?;

        self.unpad(&mut block, k)
    }

    fn encrypt<Rng: CryptoRngCore + ?Sized>(
        mut self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let k = pub_key.size();
        let em = self.pad(rng, msg, k)?;

        let m = Zeroizing::new(BigUint::from_bytes_be(&em));
        let c = rsa_encrypt(pub_key, &m)?;

        uint_to_be_pad(c, k)
    }
}

impl From<Pkcs1v15Encrypt> for EncryptionPadding {
    fn from(padding: Pkcs1v15Encrypt) -> Self {
        EncryptionPadding::Pkcs1v15(padding)
    }
}

impl From<Oaep> for EncryptionPadding {
    fn from(padding: Oaep) -> Self {
        EncryptionPadding::Oaep(padding)
    }
}

/// Parses `"pkcs1"`, `"oaep"` (SHA-1, no label) or `"none"`.
impl FromStr for EncryptionPadding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pkcs1" => Ok(EncryptionPadding::Pkcs1v15(Pkcs1v15Encrypt)),
            "oaep" => Ok(EncryptionPadding::Oaep(Oaep::new::<Sha1>())),
            "none" => Ok(EncryptionPadding::None),
            _ => Err(Error::UnknownPaddingMode),
        }
    }
}

/// Encoding applied to a message before signing.
#[derive(Debug)]
pub enum SignaturePadding {
    /// RSASSA-PSS.
    Pss(Pss),
    /// RSASSA-PKCS1-v1_5.
    Pkcs1v15(Pkcs1v15Sign),
    /// Textbook RSA: the message bytes are signed as they are.
    None,
}

impl SignaturePadding {
    /// Encodes `msg` for a modulus of `key_bits` bits.
    ///
    /// PSS draws its salt from `rng` and uses `emBits = key_bits - 1`.
    pub fn encode<R: CryptoRngCore + ?Sized>(
        &mut self,
        rng: &mut R,
        msg: &[u8],
        key_bits: usize,
    ) -> Result<Vec<u8>> {
        match self {
            SignaturePadding::Pss(pss) => {
                pss.digest.update(msg);
                let hashed = pss.digest.finalize_reset();

                let mut salt = vec![0; pss.salt_len];
                rng.fill_bytes(&mut salt[..]);

                emsa_pss_encode(&hashed, key_bits - 1, &salt, &mut *pss.digest)
            }
            SignaturePadding::Pkcs1v15(pkcs1) => {
                pkcs1.digest.update(msg);
                let hashed = pkcs1.digest.finalize_reset();

                pkcs1v15_sign_pad(&pkcs1.prefix, &hashed, (key_bits + 7) / 8)
            }
            SignaturePadding::None => Ok(msg.to_vec()),
        }
    }

    /// Checks a block recovered from a signature against `msg`.
    ///
    /// `block` is as wide as the modulus. Structural faults of the encoding
    /// are reported as errors, a well-formed encoding of a different message
    /// as `Ok(false)`.
    pub fn verify_encoded(&mut self, msg: &[u8], block: &mut [u8], key_bits: usize) -> Result<bool> {
        match self {
            SignaturePadding::Pss(pss) => {
                pss.digest.update(msg);
                let hashed = pss.digest.finalize_reset();

                emsa_pss_verify(
                    &hashed,
                    block,
                    key_bits - 1,
                    Some(pss.salt_len),
                    &mut *pss.digest,
                )
            }
            SignaturePadding::Pkcs1v15(pkcs1) => {
                pkcs1.digest.update(msg);
                let hashed = pkcs1.digest.finalize_reset();

                pkcs1v15_sign_unpad(&pkcs1.prefix, &hashed, block, (key_bits + 7) / 8)
            }
            SignaturePadding::None => Ok(bytes_to_int(block) == bytes_to_int(msg)),
        }
    }
}

impl SignatureScheme for SignaturePadding {
    fn sign<Rng: CryptoRngCore + ?Sized>(
        mut self,
        rng: &mut Rng,
        priv_key: &RsaPrivateKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let k = priv_key.size();
        let em = self.encode(&mut *rng, msg, priv_key.n().bits())?;

        let m = BigUint::from_bytes_be(&em);
        let s = rsa_decrypt_and_check(priv_key, Some(rng), &m)?;

        uint_to_be_pad(s, k)
    }

    fn verify(mut self, pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8]) -> Result<bool> {
        let k = pub_key.size();
        if sig.len() != k {
            return Err(Error::InputLength {
                expected: k,
                actual: sig.len(),
            });
        }

        let s = BigUint::from_bytes_be(sig);
        let m = rsa_encrypt(pub_key, &s)?;
        let mut block = uint_to_be_pad(m, k)?;

        match self.verify_encoded(msg, &mut block, pub_key.n().bits()) {
            Err(err) if err.is_padding_error() => Ok(false),
            result => result,
        }
    }
}

impl From<Pss> for SignaturePadding {
    fn from(padding: Pss) -> Self {
        SignaturePadding::Pss(padding)
    }
}

impl From<Pkcs1v15Sign> for SignaturePadding {
    fn from(padding: Pkcs1v15Sign) -> Self {
        SignaturePadding::Pkcs1v15(padding)
    }
}

/// Parses `"pss"` (SHA-1, 20-byte salt), `"pkcs1"` (SHA-1) or `"none"`.
impl FromStr for SignaturePadding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pss" => Ok(SignaturePadding::Pss(Pss::new::<Sha1>())),
            "pkcs1" => Ok(SignaturePadding::Pkcs1v15(Pkcs1v15Sign::new::<Sha1>())),
            "none" => Ok(SignaturePadding::None),
            _ => Err(Error::UnknownPaddingMode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Pkcs1PaddingError;
    use hex_literal::hex;
    use num_traits::FromPrimitive;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn big(n: u64) -> BigUint {
        BigUint::from_u64(n).unwrap()
    }

    fn get_private_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            BigUint::from_bytes_be(&hex!(
                "d0941e63a980fa92fb25ed4c7b3307f827023034ae7f1a7491f0699ca7607285"
                "e62ad8e994bac21b8b6e305e334f4874067d28e304230dca7f0e85f7ce595770"
                "b6e054c9f844ba86c0696eeba0769d8d4a347e8fe85c724ac1c44994af18a39e"
                "719f721f1bc50c46a39e6c075fcd1649f01f22608ce7dc6955502258336987d9"
            )),
            BigUint::from_u64(65537).unwrap(),
            BigUint::from_bytes_be(&hex!(
                "5ff4a47e690ea338573e3d8b3fea5c32378ff4296855a51017cba86a9f3de9b1"
                "dc0fbe36c76b9bbd1c4a170a5f448c2a8489b3f3ac858be4aacb3daaa14dccc1"
                "83622eedd3ae6f0427a2a298b51b97818a5430f13705f42d8b25476f939c935e"
                "389e30d9ade5d0180920135f5aef0c5fecd15f00b83b51dab8ba930d88826801"
            )),
            vec![
                BigUint::from_bytes_be(&hex!(
                    "e882d12d5f0be26a80359f13c08210bdcbf759dfee695313efa8886919659b06"
                    "4e3c656a267af6275ed1af89a5dfe9e25b31a02bafbd59445b7507a22989a681"
                )),
                BigUint::from_bytes_be(&hex!(
                    "e5a65cfa668bd857d59135a78c18c8adb7c222368e9d74abad8e83299f7ac3c2"
                    "ad7aa44ddb05deea6d9b20dbaf09a8615284a17c72d3723240334685ea7e2559"
                )),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_str() {
        assert!(matches!(
            "pkcs1".parse::<EncryptionPadding>(),
            Ok(EncryptionPadding::Pkcs1v15(_))
        ));
        assert!(matches!(
            "oaep".parse::<EncryptionPadding>(),
            Ok(EncryptionPadding::Oaep(_))
        ));
        assert!(matches!(
            "none".parse::<EncryptionPadding>(),
            Ok(EncryptionPadding::None)
        ));
        assert!(matches!(
            "pss".parse::<SignaturePadding>(),
            Ok(SignaturePadding::Pss(Pss { salt_len: 20, .. }))
        ));
        assert!(matches!(
            "pkcs1".parse::<SignaturePadding>(),
            Ok(SignaturePadding::Pkcs1v15(_))
        ));
        assert!(matches!(
            "none".parse::<SignaturePadding>(),
            Ok(SignaturePadding::None)
        ));

        for mode in ["rsa", "OAEP", "pss ", ""] {
            assert!(matches!(
                mode.parse::<EncryptionPadding>(),
                Err(Error::UnknownPaddingMode)
            ));
        }
        assert!(matches!(
            "oaep".parse::<SignaturePadding>(),
            Err(Error::UnknownPaddingMode)
        ));
    }

    #[test]
    fn test_encrypt_decrypt_every_mode() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key = get_private_key();
        let pub_key = priv_key.to_public_key();
        let k = pub_key.size();

        for mode in ["pkcs1", "oaep", "none"] {
            let msg = b"every mode round trips";
            let padding: EncryptionPadding = mode.parse().unwrap();
            let ciphertext = pub_key.encrypt(&mut rng, padding, msg).unwrap();
            assert_eq!(ciphertext.len(), k, "{}", mode);

            let padding: EncryptionPadding = mode.parse().unwrap();
            let plaintext = priv_key.decrypt(padding, &ciphertext).unwrap();
            assert_eq!(plaintext, msg, "{}", mode);

            let padding: EncryptionPadding = mode.parse().unwrap();
            let plaintext = priv_key
                .decrypt_blinded(&mut rng, padding, &ciphertext)
                .unwrap();
            assert_eq!(plaintext, msg, "{}", mode);
        }
    }

    #[test]
    fn test_none_mode_is_textbook() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key =
            RsaPrivateKey::from_components(big(3233), big(17), big(413), vec![big(61), big(53)])
                .unwrap();
        let pub_key = priv_key.to_public_key();

        let c = pub_key
            .encrypt(&mut rng, EncryptionPadding::None, &[65])
            .unwrap();
        assert_eq!(c, 2790u16.to_be_bytes());
        assert_eq!(priv_key.decrypt(EncryptionPadding::None, &c).unwrap(), [65]);

        // leading zeros do not survive the integer round trip
        let c = pub_key
            .encrypt(&mut rng, EncryptionPadding::None, &[0, 65])
            .unwrap();
        assert_eq!(priv_key.decrypt(EncryptionPadding::None, &c).unwrap(), [65]);

        assert_eq!(
            pub_key.encrypt(&mut rng, EncryptionPadding::None, &[0x0c, 0xa1]),
            Err(Error::MessageOutOfRange)
        );
    }

    #[test]
    fn test_decrypt_input_checks() {
        let priv_key = get_private_key();
        let k = priv_key.size();

        assert_eq!(
            priv_key.decrypt(Pkcs1v15Encrypt, &vec![1u8; k - 1]),
            Err(Error::InputLength {
                expected: k,
                actual: k - 1
            })
        );
        assert_eq!(
            priv_key.decrypt(Pkcs1v15Encrypt, &vec![0xffu8; k]),
            Err(Error::MessageOutOfRange)
        );

        // zero decrypts to an all-zero block, which has no PKCS#1 header
        assert_eq!(
            priv_key.decrypt(Pkcs1v15Encrypt, &vec![0u8; k]),
            Err(Error::Pkcs1Padding(Pkcs1PaddingError::Truncated))
        );
    }

    #[test]
    fn test_sign_verify_every_mode() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key = get_private_key();
        let pub_key = priv_key.to_public_key();

        for mode in ["pss", "pkcs1", "none"] {
            let msg = b"signed in every mode";
            let padding: SignaturePadding = mode.parse().unwrap();
            let sig = priv_key.sign(&mut rng, padding, msg).unwrap();
            assert_eq!(sig.len(), pub_key.size(), "{}", mode);

            let padding: SignaturePadding = mode.parse().unwrap();
            assert_eq!(pub_key.verify(padding, msg, &sig), Ok(true), "{}", mode);

            let padding: SignaturePadding = mode.parse().unwrap();
            assert_eq!(
                pub_key.verify(padding, b"another message", &sig),
                Ok(false),
                "{}",
                mode
            );
        }
    }

    #[test]
    fn test_verify_input_checks() {
        let pub_key = get_private_key().to_public_key();
        let k = pub_key.size();

        assert_eq!(
            pub_key.verify(Pss::new::<Sha1>(), b"msg", &vec![1u8; k + 1]),
            Err(Error::InputLength {
                expected: k,
                actual: k + 1
            })
        );
        assert_eq!(
            pub_key.verify(Pss::new::<Sha1>(), b"msg", &vec![0xffu8; k]),
            Err(Error::MessageOutOfRange)
        );
        // random garbage below n fails structurally and reads as invalid
        let mut sig = vec![0x5au8; k];
        sig[0] = 0x01;
        assert_eq!(pub_key.verify(Pss::new::<Sha1>(), b"msg", &sig), Ok(false));
    }
}
