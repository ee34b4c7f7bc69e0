pub use ::signature::SignatureEncoding;

use alloc::boxed::Box;
use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};

/// RSASSA-PSS signatures as described in [RFC8017 § 8.1].
///
/// Always as long as the modulus of the key that produced it.
///
/// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    pub(super) inner: Box<[u8]>,
}

impl SignatureEncoding for Signature {
    type Repr = Box<[u8]>;
}

impl From<Box<[u8]>> for Signature {
    fn from(bytes: Box<[u8]>) -> Self {
        Self { inner: bytes }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Self> {
        if bytes.is_empty() {
            return Err(signature::Error::new());
        }

        Ok(Self {
            inner: bytes.into(),
        })
    }
}

impl From<Signature> for Box<[u8]> {
    fn from(signature: Signature) -> Box<[u8]> {
        signature.inner
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl Debug for Signature {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Signature")
            .field(&format_args!("{}", self))
            .finish()
    }
}

impl LowerHex for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.inner.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl UpperHex for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.inner.iter() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting() {
        let sig = Signature::try_from(&[0x00, 0x0a, 0xff][..]).unwrap();
        assert_eq!(format!("{:x}", sig), "000aff");
        assert_eq!(format!("{:X}", sig), "000AFF");
        assert_eq!(sig.to_string(), "000AFF");
        assert_eq!(format!("{:?}", sig), "Signature(000AFF)");
    }

    #[test]
    fn test_encoding() {
        let sig = Signature::try_from(&[1u8, 2, 3][..]).unwrap();
        assert_eq!(sig.encoded_len(), 3);
        assert_eq!(&*sig.to_bytes(), &[1u8, 2, 3]);
        assert!(Signature::try_from(&[][..]).is_err());
    }
}
