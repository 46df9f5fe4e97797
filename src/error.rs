use thiserror::Error as DeriveError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, DeriveError)]
pub enum Error {
    /// The entropy source could not produce bytes.
    #[error("random source unavailable: {0}")]
    RandomSource(String),
    /// Destination buffer cannot hold the encoded salt.
    #[error("encoding buffer too small: need {needed} bytes, have {available}")]
    Encoding { needed: usize, available: usize },
    /// Salt or hash text is malformed.
    #[error("malformed salt or hash: {0}")]
    Format(#[from] FormatError),
    /// The hash primitive failed internally.
    #[error("hash primitive failed: {0}")]
    Primitive(String),
    /// Cost factor rejected by the strict constructor.
    #[error("cost factor {0} is outside 4..=31")]
    CostOutOfRange(i64),
    /// Any of the above, raised while verifying a password.
    #[error("verification failed: {0}")]
    Verification(#[source] Box<Error>),
}

impl Error {
    /// True when the error was caused by untrusted input rather than by the
    /// environment (entropy source, primitive, buffers).
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Error::Format(_) | Error::CostOutOfRange(_) => true,
            Error::Verification(inner) => inner.is_malformed_input(),
            Error::RandomSource(_) | Error::Encoding { .. } | Error::Primitive(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveError)]
pub enum FormatError {
    #[error("expected {expected} characters, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("missing '$' separator or version marker")]
    Prefix,
    #[error("unsupported version marker '{0}'")]
    UnsupportedVersion(String),
    #[error("invalid cost field '{0}'")]
    Cost(String),
    #[error("invalid radix-64 data in {0}")]
    Encoding(&'static str),
}
