#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Supported algorithms
//!
//! This crate supports several schemes described in [RFC8017]:
//!
//! - [OAEP encryption scheme](#oaep-encryption)
//! - [PKCS#1 v1.5 encryption scheme](#pkcs1-v15-encryption)
//! - [PKCS#1 v1.5 signature scheme](#pkcs1-v15-signatures)
//! - [PSS signature scheme](#pss-signatures)
//!
//! Textbook RSA without any padding is available as
//! [`EncryptionPadding::None`] and [`SignaturePadding::None`].
//!
//! All arithmetic runs on the kernel in [`math`] and [`prime`]: extended
//! Euclid, modular inverses, square-and-multiply exponentiation, the Chinese
//! remainder theorem and Miller-Rabin.
//!
//! # Usage
//!
//! ## OAEP encryption
//!
//! ```
//! use rsa_kit::{RsaPrivateKey, RsaPublicKey, Oaep};
//! use sha1::Sha1;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let bits = 2048;
//! let private_key = RsaPrivateKey::new(&mut rng, bits).expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = public_key
//!     .encrypt(&mut rng, Oaep::new::<Sha1>(), &data[..])
//!     .expect("failed to encrypt");
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! // Decrypt
//! let dec_data = private_key
//!     .decrypt(Oaep::new::<Sha1>(), &enc_data)
//!     .expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## PKCS#1 v1.5 encryption
//! ```
//! use rsa_kit::{RsaPrivateKey, RsaPublicKey, Pkcs1v15Encrypt};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let bits = 2048;
//! let private_key = RsaPrivateKey::new(&mut rng, bits).expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = public_key.encrypt(&mut rng, Pkcs1v15Encrypt, &data[..]).expect("failed to encrypt");
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! // Decrypt
//! let dec_data = private_key.decrypt(Pkcs1v15Encrypt, &enc_data).expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## PKCS#1 v1.5 signatures
//!
//! ```
//! use rsa_kit::{Pkcs1v15Sign, RsaPrivateKey};
//! use sha1::Sha1;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate a key");
//! let public_key = private_key.to_public_key();
//!
//! // Sign
//! let data = b"hello world";
//! let signature = private_key
//!     .sign(&mut rng, Pkcs1v15Sign::new::<Sha1>(), data)
//!     .expect("failed to sign");
//!
//! // Verify
//! assert_eq!(public_key.verify(Pkcs1v15Sign::new::<Sha1>(), data, &signature), Ok(true));
//! ```
//!
//! ## PSS signatures
//!
//! ```
//! use rsa_kit::RsaPrivateKey;
//! use rsa_kit::pss::{SigningKey, VerifyingKey};
//! use rsa_kit::signature::{Keypair, RandomizedSigner, SignatureEncoding, Verifier};
//! use sha1::Sha1;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let bits = 2048;
//! let private_key = RsaPrivateKey::new(&mut rng, bits).expect("failed to generate a key");
//! let signing_key = SigningKey::<Sha1>::new(private_key);
//! let verifying_key = signing_key.verifying_key();
//!
//! // Sign
//! let data = b"hello world";
//! let signature = signing_key.sign_with_rng(&mut rng, data);
//! assert_ne!(signature.to_bytes().as_ref(), data);
//!
//! // Verify
//! verifying_key.verify(data, &signature).expect("failed to verify");
//! ```
//!
//! ## Integer messages
//!
//! Every operation also takes its input as an integer. Results come back in
//! the representation of the input.
//!
//! ```
//! use rsa_kit::{BigUint, EncryptionPadding, Message, RsaPrivateKey};
//!
//! let n = BigUint::from(3233u32);
//! let e = BigUint::from(17u32);
//! let d = BigUint::from(413u32);
//! let primes = vec![BigUint::from(61u32), BigUint::from(53u32)];
//! let private_key = RsaPrivateKey::from_components(n, e, d, primes).unwrap();
//! let public_key = private_key.to_public_key();
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let msg = Message::Int(BigUint::from(65u32));
//! let c = public_key.encrypt_message(&mut rng, EncryptionPadding::None, &msg).unwrap();
//! assert_eq!(c, Message::Int(BigUint::from(2790u32)));
//! assert_eq!(private_key.decrypt_message(EncryptionPadding::None, &c).unwrap(), msg);
//! ```
//!
//! ## Choosing a padding by name
//!
//! ```
//! use rsa_kit::{EncryptionPadding, SignaturePadding};
//!
//! let padding: EncryptionPadding = "oaep".parse().unwrap();
//! assert!(matches!(padding, EncryptionPadding::Oaep(_)));
//! assert!("pss".parse::<SignaturePadding>().is_ok());
//! assert!("rot13".parse::<SignaturePadding>().is_err());
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;
pub use signature;

mod algorithms;
pub mod errors;
pub mod math;
pub mod oaep;
pub mod pkcs1v15;
pub mod prime;
pub mod pss;
pub mod traits;

mod dummy_rng;
mod key;
mod message;
mod padding;
mod prime_rand;

#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    algorithms::pad::{byte_length, bytes_to_int, int_to_bytes},
    errors::{Error, Result},
    key::{KeyGenConfig, RsaKeyPair, RsaPrivateKey, RsaPublicKey, Totient},
    message::Message,
    oaep::Oaep,
    padding::{EncryptionPadding, SignaturePadding},
    pkcs1v15::{Pkcs1v15Encrypt, Pkcs1v15Sign},
    prime_rand::RandPrime,
    pss::Pss,
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
