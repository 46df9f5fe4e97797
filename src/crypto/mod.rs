//! Cryptographic building blocks for the hashing facade.
//!
//! Provides entropy sources, the cost factor, the hash primitive and the
//! constant-time comparator.

pub mod cost;
pub mod ct;
pub mod primitive;
pub mod rng;

pub use cost::{Cost, DEFAULT_COST, MAX_COST, MIN_COST};
pub use ct::compare_equal;
pub use primitive::{Bcrypt, HashPrimitive};
pub use rng::{OsRandom, RandomSource, SeededRandom};

/// Length of the raw salt entropy (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the digest kept in a hash (23 of the 24 bytes bcrypt produces).
pub const DIGEST_LEN: usize = 23;
/// Longest password prefix bcrypt uses as key (72 bytes).
pub const MAX_KEY_LEN: usize = 72;
