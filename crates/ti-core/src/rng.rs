//! Seeded RNG for origin-destination pair sampling.
//!
//! A fixed seed reproduces the same pair sample on every run, which keeps
//! the route cache warm across restarts of a demo and makes impact
//! statistics comparable between sessions.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Thin wrapper over `SmallRng` with the sampling helpers the engine needs.
pub struct SampleRng(SmallRng);

impl SampleRng {
    /// Seed deterministically, or from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => SampleRng(SmallRng::seed_from_u64(s)),
            None    => SampleRng(SmallRng::from_entropy()),
        }
    }

    /// Two distinct indices drawn uniformly from `0..len`.
    ///
    /// Returns `None` when `len < 2`.
    pub fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let picked = rand::seq::index::sample(&mut self.0, len, 2);
        Some((picked.index(0), picked.index(1)))
    }
}
