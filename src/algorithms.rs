//! Useful algorithms related to RSA.

pub(crate) mod generate;
pub mod mgf;
pub mod oaep;
pub mod pad;
pub mod pkcs1v15;
pub mod pss;
pub mod rsa;
