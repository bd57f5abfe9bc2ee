//! Session random source.
//!
//! Every random decision in a battle (shuffles, randomized opponent actions,
//! reward offers) draws from the one [`BattleRng`] owned by the session, so a
//! seeded session replays identically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random number generator for deterministic battle resolution.
#[derive(Clone, Debug)]
pub struct BattleRng {
    rng: StdRng,
}

impl BattleRng {
    /// Create a new BattleRng with a specific seed for deterministic behavior.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a new BattleRng with random entropy (non-deterministic).
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Uniform index in `[0, upper)`. Returns 0 when `upper <= 1`.
    pub fn index(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    /// Uniform index in `[0, upper]` inclusive.
    pub fn index_inclusive(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..=upper)
    }

    /// Sample `amount` distinct indices from `[0, length)` without replacement.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }
}

impl Default for BattleRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
