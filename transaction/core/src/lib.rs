// Copyright (c) 2025 The Vela Foundation

//! The Vela transaction format and its validation rules.
//!
//! A transaction spends ring-confidential inputs and creates one-time
//! addressed outputs whose amounts are hidden behind Pedersen commitments.
//! This crate defines the wire types ([`tx::Tx`] and friends), the signature
//! scheme binding them together ([`ring_ct::SignatureRctFull`]), and the
//! rules a candidate transaction must satisfy ([`validation`]).

pub mod constants;
pub mod decoys;
pub mod domain_separators;
pub mod range_proofs;
pub mod ring_ct;
pub mod tx;
pub mod validation;

mod amount;
mod tx_error;

pub use amount::{AmountError, MaskedAmount};
pub use tx_error::NewTxError;

// Re-exported so that downstream crates get the ring signature types from a
// single place.
pub use vela_crypto_ring_signature::{
    onetime_keys, Commitment, CompressedCommitment, CurveScalar, KeyImage, PedersenGens,
    ReducedTxOut, RingMLSAG, Scalar,
};
