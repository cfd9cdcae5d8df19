//! Deterministic random number generation with forking.
//!
//! A match seeded with a fixed value replays identically. Each AI seat
//! takes its own fork so the two seats draw independent streams.
//!
//! ```
//! use nim_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut home = rng.fork();
//! let mut away = rng.fork();
//!
//! // Forks are deterministic: same seed, same fork order, same stream
//! let mut again = GameRng::new(42);
//! assert_eq!(home.gen_range_u64(0..1000), again.fork().gen_range_u64(0..1000));
//! # let _ = away.gen_range_u64(0..10);
//! ```

use std::ops::{Range, RangeInclusive};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 stream that remembers its seed, so a match can be replayed.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child RNG. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(0x9E3779B97F4A7C15)))
    }

    /// Uniform draw from the half-open `range`.
    pub fn gen_range_u64(&mut self, range: Range<u64>) -> u64 {
        self.inner.gen_range(range)
    }

    /// Uniform draw from `range`, both ends included.
    pub fn gen_range_u32(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Uniform pick from `items`, `None` if it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
