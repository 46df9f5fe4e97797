//! Textual salt and hash tokens.
//!
//! Provides the typed wrappers around bcrypt's modular crypt strings and the
//! version-aware decoding of stored values.

use std::{fmt, str::FromStr};

use zeroize::Zeroizing;

use crate::{
    crypto::{Cost, DIGEST_LEN, SALT_LEN, compare_equal},
    error::{Error, FormatError, Result},
};

pub mod mcf;

pub use mcf::{HASH_STR_LEN, SALT_STR_LEN};

/// bcrypt version marker.
///
/// `2x` is deliberately missing: it names crypt_blowfish's sign-extension
/// bug, which the primitive does not reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    #[default]
    TwoA,
    TwoB,
    TwoY,
}

impl Version {
    pub fn as_str(self) -> &'static str {
        match self {
            Version::TwoA => "2a",
            Version::TwoB => "2b",
            Version::TwoY => "2y",
        }
    }

    pub(crate) fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"2a" => Some(Version::TwoA),
            b"2b" => Some(Version::TwoB),
            b"2y" => Some(Version::TwoY),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::from_marker(s.as_bytes())
            .ok_or_else(|| FormatError::UnsupportedVersion(s.to_string()))
    }
}

/// Decoded salt parameters.
pub struct SaltParts {
    version: Version,
    cost: Cost,
    entropy: Zeroizing<[u8; SALT_LEN]>,
}

impl SaltParts {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn entropy(&self) -> &[u8; SALT_LEN] {
        &self.entropy
    }
}

impl fmt::Debug for SaltParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltParts")
            .field("version", &self.version)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// A bcrypt salt such as `$2a$12$R9h/cIPz0gi.URNNX3kh2O`.
///
/// A salt is meant for exactly one hash operation, so it is not `Clone` and
/// [`Hasher::hash`](crate::Hasher::hash) takes it by value.
#[derive(Debug, PartialEq, Eq)]
pub struct Salt {
    text: String,
    version: Version,
    cost: Cost,
}

impl Salt {
    /// Encodes version, cost and raw entropy into a salt.
    pub fn encode(version: Version, cost: Cost, entropy: &[u8; SALT_LEN]) -> Result<Self> {
        let mut buf = [0u8; SALT_STR_LEN];
        let n = mcf::encode_salt_into(version, cost, entropy, &mut buf)?;
        let text = std::str::from_utf8(&buf[..n])
            .map_err(|_| FormatError::Encoding("salt"))?
            .to_string();

        Ok(Self {
            text,
            version,
            cost,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn parts(&self) -> Result<SaltParts> {
        mcf::decode_salt(&self.text)
    }
}

impl FromStr for Salt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = mcf::decode_salt(s)?;
        Ok(Self {
            text: s.to_string(),
            version: parts.version,
            cost: parts.cost,
        })
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A full bcrypt hash: the salt followed by the encoded digest.
///
/// Equality is checked in constant time.
#[derive(Debug, Clone)]
pub struct Hash {
    text: String,
    version: Version,
    cost: Cost,
}

impl Hash {
    pub(crate) fn assemble(salt: &str, parts: &SaltParts, digest: &[u8; DIGEST_LEN]) -> Self {
        let mut text = String::with_capacity(HASH_STR_LEN);
        text.push_str(salt);
        text.push_str(&mcf::encode_digest(digest));

        Self {
            text,
            version: parts.version,
            cost: parts.cost,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The embedded salt text.
    pub fn salt_str(&self) -> &str {
        &self.text[..SALT_STR_LEN]
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl PartialEq for Hash {
    fn eq(&self, other: &Self) -> bool {
        compare_equal(self.text.as_bytes(), other.text.as_bytes())
    }
}

impl Eq for Hash {}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = mcf::decode_hash(s)?;
        Ok(Self {
            text: s.to_string(),
            version: parts.version,
            cost: parts.cost,
        })
    }
}

impl AsRef<str> for Hash {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Decodes the parameters of a salt or of a full hash.
///
/// # Errors
///
/// Returns [`Error::Format`] if:
/// - the length matches neither a salt nor a hash
/// - the version marker is missing or unsupported
/// - the cost field is not a two-digit value in range
/// - the radix-64 data is invalid
pub fn decode(text: &str) -> Result<SaltParts> {
    match text.len() {
        SALT_STR_LEN => mcf::decode_salt(text),
        _ => mcf::decode_hash(text),
    }
}
