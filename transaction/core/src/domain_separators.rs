// Copyright (c) 2025 The Vela Foundation

//! Domain separation tags for hashes used by the transaction format.
//!
//! Changing any of these tags changes the meaning of every hash derived from
//! them, so they are fixed forever.

/// Domain tag for the value mask of a masked amount.
pub const AMOUNT_VALUE_DOMAIN_TAG: &str = "vela_amount_value";

/// Domain tag for the blinding factor of a masked amount.
pub const AMOUNT_BLINDING_DOMAIN_TAG: &str = "vela_amount_blinding";

/// Domain tag for the merlin transcript of the aggregated range proof.
pub const RANGE_PROOF_DOMAIN_TAG: &str = "vela_range_proof";

/// Domain tag for the extended message digest signed by each ring signature.
pub const EXTENDED_MESSAGE_DOMAIN_TAG: &str = "vela_extended_message";

/// Domain tag for transaction hashing.
pub const TX_HASH_DOMAIN_TAG: &str = "vela_tx_hash";
