//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds functions that apply RSA's core encryption and decryption
//! primitives to raw data without adding or removing appropriate padding, and
//! the padding codecs on their own, detached from any key. A well-reviewed
//! padding scheme is crucial to the security of RSA, so there are very few
//! valid uses cases for this API. It's intended to be used for implementing
//! well-reviewed higher-level constructions.
//!
//! We do NOT recommend using it to implement any algorithm which has not
//! received extensive peer review by cryptographers.
//!
//! # Example
//!
//! ```
//! use rsa_kit::hazmat::{pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//!
//! let mut rng = ChaCha8Rng::from_seed([42; 32]);
//! let em = pkcs1v15_encrypt_pad(&mut rng, b"hi", 64).unwrap();
//! assert_eq!(em.len(), 2 + 11);
//! assert_eq!(&em[..2], &[0x00, 0x02]);
//! assert_eq!(pkcs1v15_encrypt_unpad(&em).unwrap(), b"hi");
//! ```

pub use crate::algorithms::mgf::{mgf1, mgf1_xor};
pub use crate::algorithms::oaep::{oaep_decrypt_unpad, oaep_encrypt_pad};
pub use crate::algorithms::pkcs1v15::{pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad};
pub use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify};
pub use crate::algorithms::rsa::{rsa_decrypt, rsa_decrypt_and_check, rsa_encrypt};
