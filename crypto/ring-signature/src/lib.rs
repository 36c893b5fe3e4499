// Copyright (c) 2025 The Vela Foundation

//! Linkable ring signatures and supporting primitives.
//!
//! This crate provides the cryptographic heart of Vela's input privacy:
//!
//! - Pedersen commitment generators and commitments to amounts.
//! - One-time ("stealth") output keys derived by Diffie-Hellman agreement.
//! - `RingMLSAG`, a linkable ring signature proving knowledge of exactly one
//!   ring member's private key, bound to a double-spend-preventing key image.

#![no_std]
#![deny(missing_docs)]
#![allow(non_snake_case)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod domain_separators;
pub mod onetime_keys;

mod commitment;
mod curve_scalar;
mod generators;
mod ring_signature;

pub use commitment::{Commitment, CompressedCommitment};
pub use curve_scalar::CurveScalar;
pub use generators::{generators, PedersenGens, B_BLINDING};
pub use ring_signature::{hash_to_point, Error, KeyImage, RingMLSAG, Scalar};

use serde::{Deserialize, Serialize};
use vela_crypto_keys::CompressedRistrettoPublic;

/// The data of a transaction output which a ring signature ranges over.
///
/// A ring is a list of these: the one-time output key being (possibly) spent,
/// the transaction public key it was created under, and the amount
/// commitment.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ReducedTxOut {
    /// The tx_out.public_key (transaction public key).
    pub public_key: CompressedRistrettoPublic,

    /// The tx_out.target_key (one-time output key).
    pub target_key: CompressedRistrettoPublic,

    /// The amount commitment.
    pub commitment: CompressedCommitment,
}
