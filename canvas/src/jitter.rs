//! The single source of randomness for card placement.
//!
//! Spread-out offsets and rotation jitter all draw from one [`Jitter`] owned by
//! the engine, so a seeded engine reproduces the same layout exactly.

#[cfg(test)]
#[path = "jitter_test.rs"]
mod jitter_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random integer source.
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
}

impl Jitter {
    /// A source that produces the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniformly distributed integer in `[min, max]`, inclusive on both ends.
    ///
    /// Returns `min` when the range is empty or a single value.
    pub fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Integer in `[-spread, spread]`.
    ///
    /// The sign of `spread` is ignored; `i64::MIN` saturates to `i64::MAX`.
    pub fn symmetric(&mut self, spread: i64) -> i64 {
        let spread = i64::try_from(spread.unsigned_abs()).unwrap_or(i64::MAX);
        self.int_inclusive(-spread, spread)
    }
}
