// Copyright (c) 2025 The Vela Foundation

//! Helpers for deterministic, seedable randomness in tests.

pub use rand_core::{CryptoRng, RngCore, SeedableRng};

/// The RNG type used throughout the test suites.
pub type RngType = rand_hc::Hc128Rng;

/// A fixed seed for tests that want one deterministic run.
pub const DEFAULT_SEED: [u8; 32] = [3u8; 32];

/// Get an RNG seeded with [`DEFAULT_SEED`].
pub fn get_seeded_rng() -> RngType {
    RngType::from_seed(DEFAULT_SEED)
}

/// Run a closure against several deterministic seeds.
///
/// Cheaper than proptest for tests that just need a few independent runs.
pub fn run_with_several_seeds<F: FnMut(RngType)>(mut f: F) {
    for i in 0..4u8 {
        let mut seed = DEFAULT_SEED;
        seed[0] = i;
        f(RngType::from_seed(seed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = get_seeded_rng();
        let mut b = get_seeded_rng();
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
