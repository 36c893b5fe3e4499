// Copyright (c) 2025 The Vela Foundation

//! Domain separation tags for hashes in this crate.
//!
//! Domain separation ensures that a hash computed in one context cannot be
//! replayed in another. Changing any of these is a hard fork.

/// Domain tag for hashing a public key onto the curve (key images).
pub const HASH_TO_POINT_DOMAIN_TAG: &str = "vela_ristretto_hash_to_point";

/// Domain tag for hashing a shared secret to a scalar (one-time keys).
pub const ONETIME_KEY_HASH_DOMAIN_TAG: &str = "vela_onetime_key_hash";

/// Domain tag for the MLSAG round challenges.
pub const RING_MLSAG_CHALLENGE_DOMAIN_TAG: &str = "vela_ring_mlsag_challenge";

/// Domain tag for deriving the nothing-up-my-sleeve value generator.
pub const VALUE_GENERATOR_DOMAIN_TAG: &str = "vela_value_generator";
