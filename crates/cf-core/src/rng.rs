//! Seeded randomness for fleet and job generators.
//!
//! The planner and assigner are deterministic and never draw from here.
//! Generators and randomised tests do, so a whole scenario replays from one
//! seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Golden-ratio increment, spreads stream indices across the seed space.
const STREAM_STEP: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct SimRng {
    seed: u64,
    rng:  SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream `index` of this seed.  Depends only on the seed and the index,
    /// never on how much has been drawn from `self`.
    pub fn stream(&self, index: u64) -> SimRng {
        SimRng::new(self.seed ^ index.wrapping_add(1).wrapping_mul(STREAM_STEP))
    }

    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}
