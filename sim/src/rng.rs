//! Injectable, seedable randomness source
//!
//! Every random decision in the simulator flows through [`BattleRng`], so a
//! turn replayed with the same state, actions, and seed produces the same
//! result. Branch simulation seeds one rng per branch.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The simulator's randomness source: a small, fast PRNG behind the handful
/// of draw shapes the resolver needs.
#[derive(Debug, Clone)]
pub struct BattleRng {
    inner: SmallRng,
}

impl BattleRng {
    /// Create a source from a seed; equal seeds produce equal draw sequences
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// True with probability `num / den`
    pub fn chance(&mut self, num: u32, den: u32) -> bool {
        self.inner.gen_range(0..den) < num
    }

    /// True with the given percent probability
    pub fn percent(&mut self, pct: u8) -> bool {
        self.chance(pct as u32, 100)
    }

    /// Uniform draw from `lo..=hi`
    pub fn range(&mut self, lo: u8, hi: u8) -> u8 {
        self.inner.gen_range(lo..=hi)
    }

    /// Uniform index into a collection of the given length
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Fair coin flip
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// One damage roll from the 85..=100 percent spread
    pub fn damage_roll(&mut self) -> u8 {
        self.inner.gen_range(85..=100)
    }

    /// Hit count for a 2-5 hit move, weighted 35/35/15/15
    pub fn multi_hit_count(&mut self) -> u8 {
        match self.inner.gen_range(0..100u32) {
            0..=34 => 2,
            35..=69 => 3,
            70..=84 => 4,
            _ => 5,
        }
    }
}
