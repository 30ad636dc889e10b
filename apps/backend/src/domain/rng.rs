//! Injectable, seedable randomness.
//!
//! Every session carries its own [`SessionRng`] (base seed + cursor), so all
//! random decisions are reproducible from the seed and survive persistence.
//! Base seeds come from a [`SeedSource`]: entropy in production, fixed in tests.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::seed_derivation::derive_step_seed;

/// Supplies base seeds for new sessions.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u64;
}

/// Uniformly distributed seeds from the thread-local generator.
#[derive(Debug, Default)]
pub struct EntropySeedSource;

impl SeedSource for EntropySeedSource {
    fn next_seed(&self) -> u64 {
        rand::rng().random::<u64>()
    }
}

/// Deterministic seeds: `base`, `base + 1`, ... in call order.
#[derive(Debug)]
pub struct FixedSeedSource {
    base: u64,
    counter: AtomicU64,
}

impl FixedSeedSource {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            counter: AtomicU64::new(0),
        }
    }
}

impl SeedSource for FixedSeedSource {
    fn next_seed(&self) -> u64 {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        self.base.wrapping_add(n)
    }
}

/// Per-session random stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRng {
    pub seed: u64,
    pub cursor: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, cursor: 0 }
    }

    /// A generator for the next random decision; advances the cursor.
    pub fn next_rng(&mut self) -> ChaCha8Rng {
        let step = derive_step_seed(self.seed, self.cursor);
        self.cursor = self.cursor.wrapping_add(1);
        ChaCha8Rng::seed_from_u64(step)
    }
}
