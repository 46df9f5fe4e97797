//! bcrypt password hashing with pluggable entropy and constant-time
//! verification.
//!
//! ```no_run
//! use hashpw::{Hasher, MatchResult};
//!
//! let hasher = Hasher::new();
//! let salt = hasher.generate_salt(12)?;
//! let hash = hasher.hash("Sample#1", salt)?;
//! assert_eq!(hasher.verify("Sample#1", &hash)?, MatchResult::Match);
//! # Ok::<(), hashpw::Error>(())
//! ```

pub mod crypto;
pub mod error;
pub mod format;

pub use crate::crypto::{
    Bcrypt, Cost, DEFAULT_COST, HashPrimitive, MAX_COST, MIN_COST, OsRandom, RandomSource,
    SeededRandom, compare_equal,
};
pub use crate::error::{Error, FormatError, Result};
pub use crate::format::{Hash, Salt, SaltParts, Version};

use crate::crypto::SALT_LEN;
use crate::format::{SALT_STR_LEN, mcf};
use zeroize::Zeroizing;

/// Outcome of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Match,
    NoMatch,
}

impl MatchResult {
    pub fn is_match(self) -> bool {
        self == MatchResult::Match
    }
}

/// Generates salts, hashes passwords and verifies them against stored hashes.
///
/// Holds no mutable state; a single `Hasher` may serve concurrent callers as
/// long as its random source and primitive allow it.
#[derive(Debug, Clone)]
pub struct Hasher<R = OsRandom, P = Bcrypt> {
    rng: R,
    primitive: P,
    version: Version,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// OS entropy and the bcrypt primitive.
    pub fn new() -> Self {
        Self::with_parts(OsRandom, Bcrypt)
    }
}

impl<R: RandomSource, P: HashPrimitive> Hasher<R, P> {
    pub fn with_parts(rng: R, primitive: P) -> Self {
        Self {
            rng,
            primitive,
            version: Version::default(),
        }
    }

    /// Version marker written into generated salts.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Builds a fresh salt with 16 bytes of entropy.
    ///
    /// A cost outside `4..=31` is replaced by [`DEFAULT_COST`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if no entropy is available and
    /// [`Error::Encoding`] if the salt cannot be encoded.
    pub fn generate_salt(&self, cost: i64) -> Result<Salt> {
        let cost = Cost::new(cost);

        let mut entropy = Zeroizing::new([0u8; SALT_LEN]);
        self.rng.fill(&mut *entropy)?;
        let salt = Salt::encode(self.version, cost, &entropy)?;

        log::debug!("generated ${}$ salt with cost {cost}", self.version);
        Ok(salt)
    }

    /// Hashes `password` with `salt`, consuming the salt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the salt is malformed and
    /// [`Error::Primitive`] if the primitive fails.
    pub fn hash(&self, password: impl AsRef<[u8]>, salt: Salt) -> Result<Hash> {
        let parts = salt.parts()?;
        let digest = self.primitive.digest(password.as_ref(), &parts)?;

        log::debug!("hashed password with cost {}", parts.cost());
        Ok(Hash::assemble(salt.as_str(), &parts, &digest))
    }

    /// Generates a salt for `cost` and hashes `password` with it.
    pub fn hash_with_cost(&self, password: impl AsRef<[u8]>, cost: i64) -> Result<Hash> {
        let salt = self.generate_salt(cost)?;
        self.hash(password, salt)
    }

    /// Checks `password` against a stored hash.
    ///
    /// A wrong password is `Ok(MatchResult::NoMatch)`. The stored hash is
    /// recomputed with its own salt and both full strings are compared in
    /// constant time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Verification`] wrapping the cause if the stored hash
    /// is malformed or the primitive fails.
    pub fn verify(
        &self,
        password: impl AsRef<[u8]>,
        stored: impl AsRef<str>,
    ) -> Result<MatchResult> {
        let result = self
            .recompute_and_compare(password.as_ref(), stored.as_ref())
            .map_err(|e| Error::Verification(Box::new(e)));

        match &result {
            Ok(outcome) => log::debug!("verification finished: {outcome:?}"),
            Err(e) => log::debug!("verification error: {e}"),
        }
        result
    }

    fn recompute_and_compare(&self, password: &[u8], stored: &str) -> Result<MatchResult> {
        let parts = mcf::decode_hash(stored)?;
        let digest = self.primitive.digest(password, &parts)?;
        let candidate = Hash::assemble(&stored[..SALT_STR_LEN], &parts, &digest);

        if candidate.as_str().len() != stored.len() {
            return Err(FormatError::Length {
                expected: candidate.as_str().len(),
                actual: stored.len(),
            }
            .into());
        }

        if compare_equal(candidate.as_str().as_bytes(), stored.as_bytes()) {
            Ok(MatchResult::Match)
        } else {
            Ok(MatchResult::NoMatch)
        }
    }
}
