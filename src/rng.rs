//! Source of cryptographically secure randomness.
//!
//! Randomized operations take the generator as a `&dyn SecureRandom` so the
//! thread-safety contract is part of the type and tests can swap in doubles.

use crate::error::{CryptoError, Result};

/// A cryptographically secure random generator, usable from many threads.
pub trait SecureRandom: Send + Sync {
    /// Fill `buf` entirely with random bytes or fail without partial output.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::fill(buf)
            .map_err(|_| CryptoError::CryptoUnavailable("OS random generator unavailable"))
    }
}

/// Fill a fixed-size array from `rng`.
pub(crate) fn random_array<const N: usize>(rng: &dyn SecureRandom) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    rng.fill(&mut out)?;
    Ok(out)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicU8, Ordering};

    /// Always fails, like a sandbox without an entropy source.
    pub struct BrokenRandom;

    impl SecureRandom for BrokenRandom {
        fn fill(&self, _buf: &mut [u8]) -> Result<()> {
            Err(CryptoError::CryptoUnavailable("entropy source offline"))
        }
    }

    /// Predictable output: every call fills with the next counter value.
    #[derive(Default)]
    pub struct CountingRandom {
        next: AtomicU8,
    }

    impl SecureRandom for CountingRandom {
        fn fill(&self, buf: &mut [u8]) -> Result<()> {
            let byte = self.next.fetch_add(1, Ordering::Relaxed);
            buf.fill(byte);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let a: [u8; 32] = random_array(&OsRandom).unwrap();
        let b: [u8; 32] = random_array(&OsRandom).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn broken_source_reports_unavailable() {
        let err = random_array::<16>(&BrokenRandom).unwrap_err();
        assert!(matches!(err, CryptoError::CryptoUnavailable(_)));
    }

    #[test]
    fn counting_source_is_deterministic() {
        let rng = CountingRandom::default();
        assert_eq!(random_array::<4>(&rng).unwrap(), [0u8; 4]);
        assert_eq!(random_array::<4>(&rng).unwrap(), [1u8; 4]);
    }
}
