//! Injected randomness for distance fallback and cost jitter.
//!
//! The planner never reaches for a global RNG. Callers pass a
//! [`RandomSource`] into each planning call, so production can use a
//! freshly seeded generator while tests pin exact values.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// ChaCha8-backed random source.
///
/// Identical seeds produce identical plans across platforms.
#[derive(Debug, Clone)]
pub struct SeededRandom(ChaCha8Rng);

impl SeededRandom {
    /// Create a generator seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Random source that always returns the same sample.
///
/// Values outside `[0, 1)` are clamped into range.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(f64);

impl FixedRandom {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0 - f64::EPSILON))
    }
}

impl RandomSource for FixedRandom {
    fn unit(&mut self) -> f64 {
        self.0
    }
}
