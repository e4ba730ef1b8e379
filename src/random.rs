//! Seeded RNG construction.
//!
//! Every stochastic choice in the engine draws from an injected generator
//! so runs are reproducible from a single seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
