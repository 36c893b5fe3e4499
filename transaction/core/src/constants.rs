// Copyright (c) 2025 The Vela Foundation

//! Vela transaction constants.

use vela_crypto_ring_signature::Scalar;

/// Each input ring must contain at least this many elements.
pub const RING_SIZE: usize = 11;

/// Each transaction must contain no more than this many inputs (rings).
pub const MAX_INPUTS: u64 = 16;

/// Each transaction must contain no more than this many outputs.
pub const MAX_OUTPUTS: u64 = 16;

/// Maximum size, in bytes, of a canonically encoded transaction.
///
/// A transaction at the input, output and ring size limits encodes to well
/// under 256 KiB, so anything past this is malformed or hostile.
pub const MAX_TX_SIZE: usize = 262_144;

/// Maximum number of blocks in the future a transaction's tombstone block can
/// be set to.
///
/// At a rate of 2 blocks a minute this is 7 days, after which a pending
/// transaction which never made it into a block can be forgotten by every
/// node that saw it.
pub const MAX_TOMBSTONE_BLOCKS: u64 = 20160;

/// The smallest fee accepted by validators, in the smallest denomination.
pub const MINIMUM_FEE: u64 = 10_000_000;

/// Blinding for the implicit fee output. Fees are declared in the clear, so
/// their commitment carries no entropy.
pub const FEE_BLINDING: Scalar = Scalar::ZERO;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_size() {
        // The minimum anonymity set is fixed at 11.
        assert_eq!(RING_SIZE, 11);
        assert!(RING_SIZE % 2 == 1);
    }

    #[test]
    fn test_input_output_limits() {
        assert_eq!(MAX_INPUTS, 16);
        assert_eq!(MAX_OUTPUTS, 16);
    }

    #[test]
    fn test_max_tombstone_blocks() {
        // 2 blocks/min * 60 min * 24 hr * 7 days.
        assert_eq!(MAX_TOMBSTONE_BLOCKS, 2 * 60 * 24 * 7);
    }

    #[test]
    fn test_fee_blinding_is_zero() {
        // Fees are public, so their commitment must be deterministic.
        assert_eq!(FEE_BLINDING, Scalar::ZERO);
    }
}
