//! Deterministic simulation-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! All randomness in the framework (initial agent placement, random yaw)
//! flows through one `SimRng` seeded from `SimulatorConfiguration::seed`.
//! Re-seeding via `Simulator::seed` restores a known stream, so a run is
//! reproducible from `(configuration, seed)` alone.  Collaborator
//! implementations that need their own randomness (e.g. a pathfinder's
//! navigable-point sampler) receive the seed through their own `seed` hook
//! and must be equally deterministic.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level deterministic RNG.
///
/// Used only in single-threaded contexts; the simulator's blocking execution
/// model means there is never concurrent access.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
