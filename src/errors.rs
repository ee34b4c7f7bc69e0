//! Error types.

use core::fmt;

/// Alias for [`core::result::Result`] with the `rsa-kit` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A padding mode name was not recognized.
    UnknownPaddingMode,

    /// An input to modular exponentiation was not in `[0, n)`.
    MessageOutOfRange,

    /// PKCS#1 v1.5 encryption block is malformed.
    Pkcs1Padding(Pkcs1PaddingError),

    /// OAEP encoded message is malformed.
    OaepPadding(OaepPaddingError),

    /// PSS encoded message is malformed.
    PssPadding(PssPaddingError),

    /// Message too long for the key, hash and salt combination.
    MessageTooLong,

    /// Ciphertext or signature does not have the length of the modulus.
    InputLength {
        /// Modulus size in bytes.
        expected: usize,
        /// Length of the offered input.
        actual: usize,
    },

    /// Input must be hashed.
    InputNotHashed,

    /// Key size must be at least 512 bits and a multiple of 8.
    InvalidKeySize,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Invalid coefficient.
    InvalidCoefficient,

    /// Public exponent too small.
    PublicExponentTooSmall,

    /// OAEP label too long.
    LabelTooLong,

    /// Invalid padding length.
    InvalidPadLen,

    /// Internal error.
    Internal,
}

impl Error {
    /// Returns `true` for every decoding failure of a padded block.
    ///
    /// The padding kinds are distinct so that tests can tell them apart. Anything
    /// that reports decryption or verification results to an untrusted party must
    /// collapse all of them into one indistinguishable failure; this crate does
    /// not do that on the caller's behalf.
    pub fn is_padding_error(&self) -> bool {
        matches!(
            self,
            Error::Pkcs1Padding(_) | Error::OaepPadding(_) | Error::PssPadding(_)
        )
    }
}

/// Reasons a PKCS#1 v1.5 encryption block is rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Pkcs1PaddingError {
    /// Block shorter than the fixed 11-byte header.
    Truncated,
    /// Marker bytes `00 02 .. 00` are not in place.
    InvalidHeader,
    /// A filler byte is zero.
    ZeroFiller,
}

/// Reasons an OAEP encoded message is rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OaepPaddingError {
    /// Block cannot be split into `0x00 || seed || DB`.
    Decomposition,
    /// First byte is not zero.
    LeadingByte,
    /// Recovered label hash does not match.
    LabelHash,
    /// No `0x01` delimiter after the label hash.
    MissingDelimiter,
    /// A byte other than zero precedes the delimiter.
    NonZeroPadding,
}

/// Reasons a PSS encoded message is rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PssPaddingError {
    /// Last byte is not `0xbc`.
    Trailer,
    /// Bits above `emBits` are set.
    HighBits,
    /// `PS` contains a nonzero byte.
    NonZeroPadding,
    /// The `0x01` byte in front of the salt is missing.
    MissingDelimiter,
}

impl fmt::Display for Pkcs1PaddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pkcs1PaddingError::Truncated => write!(f, "block too short"),
            Pkcs1PaddingError::InvalidHeader => write!(f, "invalid marker bytes"),
            Pkcs1PaddingError::ZeroFiller => write!(f, "zero byte in filler"),
        }
    }
}

impl fmt::Display for OaepPaddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OaepPaddingError::Decomposition => write!(f, "decomposition length mismatch"),
            OaepPaddingError::LeadingByte => write!(f, "nonzero leading byte"),
            OaepPaddingError::LabelHash => write!(f, "label hash mismatch"),
            OaepPaddingError::MissingDelimiter => write!(f, "missing 0x01 delimiter"),
            OaepPaddingError::NonZeroPadding => write!(f, "padding bytes not all zero"),
        }
    }
}

impl fmt::Display for PssPaddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PssPaddingError::Trailer => write!(f, "invalid trailer byte"),
            PssPaddingError::HighBits => write!(f, "nonzero high bits"),
            PssPaddingError::NonZeroPadding => write!(f, "padding bytes not all zero"),
            PssPaddingError::MissingDelimiter => write!(f, "missing 0x01 delimiter"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownPaddingMode => write!(f, "unknown padding mode"),
            Error::MessageOutOfRange => write!(f, "message representative out of range"),
            Error::Pkcs1Padding(e) => write!(f, "PKCS#1 v1.5 padding error: {}", e),
            Error::OaepPadding(e) => write!(f, "OAEP padding error: {}", e),
            Error::PssPadding(e) => write!(f, "PSS padding error: {}", e),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::InputLength { expected, actual } => {
                write!(f, "input length {} does not match modulus size {}", actual, expected)
            }
            Error::InputNotHashed => write!(f, "input must be hashed"),
            Error::InvalidKeySize => write!(f, "key size must be a multiple of 8 and >= 512"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidCoefficient => write!(f, "invalid coefficient"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::LabelTooLong => write!(f, "label too long"),
            Error::InvalidPadLen => write!(f, "invalid padding length"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        #[cfg(feature = "std")]
        {
            Self::from_source(err)
        }
        #[cfg(not(feature = "std"))]
        {
            let _ = err;
            Self::new()
        }
    }
}
