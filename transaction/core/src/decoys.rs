// Copyright (c) 2025 The Vela Foundation

//! Decoy selection for input rings.
//!
//! When a client spends an output it hides the real input among decoys drawn
//! from the global output set. A uniform draw would make the real input stand
//! out statistically, since real spends skew heavily toward recent outputs
//! while the global set is dominated by old ones. The selector here biases
//! toward older indices quadratically, which flattens that signal without
//! requiring chain analysis at selection time.

use rand_core::{CryptoRng, RngCore};
use vela_common::HashSet;

/// Chooses decoy output indices for a ring.
pub trait DecoySelector {
    /// Select `count` distinct output indices from `[0, num_tx_outs)`,
    /// excluding the indices in `exclude`.
    ///
    /// Returns fewer than `count` indices when the output set is too small
    /// to supply them.
    fn select_decoys(&mut self, num_tx_outs: u64, exclude: &[u64], count: usize) -> Vec<u64>;
}

/// A selector drawing indices with quadratic bias toward older outputs.
///
/// Index 0 is the oldest output. A draw `u` uniform in `[0, 1)` is mapped to
/// `floor(u^2 * n)`, concentrating mass near zero.
pub struct AgeWeightedSelector<R: RngCore + CryptoRng> {
    rng: R,
}

impl<R: RngCore + CryptoRng> AgeWeightedSelector<R> {
    /// Create a selector using the given randomness source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn draw(&mut self, num_tx_outs: u64) -> u64 {
        // 53 random bits give a uniform f64 in [0, 1).
        let u = (self.rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        let index = (u * u * num_tx_outs as f64) as u64;
        index.min(num_tx_outs - 1)
    }
}

impl<R: RngCore + CryptoRng> DecoySelector for AgeWeightedSelector<R> {
    fn select_decoys(&mut self, num_tx_outs: u64, exclude: &[u64], count: usize) -> Vec<u64> {
        let excluded: HashSet<u64> = exclude.iter().copied().collect();

        let available = num_tx_outs.saturating_sub(excluded.len() as u64);
        let count = count.min(available as usize);

        let mut chosen: HashSet<u64> = HashSet::default();
        let mut result = Vec::with_capacity(count);
        while result.len() < count {
            let index = self.draw(num_tx_outs);
            if excluded.contains(&index) || !chosen.insert(index) {
                continue;
            }
            result.push(index);
        }
        result
    }
}
