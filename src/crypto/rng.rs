use std::sync::{Arc, Mutex};

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::error::{Error, Result};

/// Source of salt entropy.
///
/// `fill` must write every byte of `buf` with values fit for cryptographic
/// use; an empty buffer is a no-op. Implementations are shared between
/// threads, so they must be safe to call concurrently.
pub trait RandomSource: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

impl<T: RandomSource + ?Sized> RandomSource for &T {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Arc<T> {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        getrandom::fill(buf)
            .map_err(|e| Error::RandomSource(format!("OS random generator unavailable: {e}")))
    }
}

/// Deterministic generator seeded from a single `u64`.
///
/// NOT cryptographically secure: anyone who learns or guesses the seed can
/// reproduce every salt. Only for tests and for targets without an OS
/// entropy source, where this weakness has to be accepted explicitly.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        log::warn!("using seeded random source; salts are predictable");
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::RandomSource("seeded generator lock poisoned".into()))?;
        rng.fill_bytes(buf);
        Ok(())
    }
}
