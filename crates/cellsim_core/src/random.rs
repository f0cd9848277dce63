//! Seeded random service shared by the environment and stochastic modules.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

/// Deterministic random stream.
///
/// When no seed is supplied one is drawn from entropy and kept, so any run
/// can be replayed from its reported seed.
#[derive(Debug, Clone)]
pub struct SimRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SimRandom {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Restarts the stream from `seed`.
    pub fn set_random_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    pub fn next_u128(&mut self) -> u128 {
        self.rng.gen::<u128>()
    }

    /// Direction drawn uniformly from the unit sphere.
    pub fn unit_vector(&mut self) -> DVec3 {
        let z: f64 = self.rng.gen_range(-1.0..=1.0);
        let phi: f64 = self.rng.gen_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        DVec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl Default for SimRandom {
    fn default() -> Self {
        Self::new(None)
    }
}
