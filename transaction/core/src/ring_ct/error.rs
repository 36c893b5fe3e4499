// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur when signing or verifying a ring-confidential
//! transaction signature.

use crate::range_proofs;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use vela_crypto_keys::KeyError;

/// An error which can occur when signing or verifying a `SignatureRctFull`.
#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Error {
    /// The signature must have at least one input ring
    NoInputs,

    /// Too many input rings: `{0}`, maximum `{1}`
    TooManyInputs(usize, usize),

    /// The signature must cover at least one output
    NoOutputs,

    /// Too many outputs: `{0}`, maximum `{1}`
    TooManyOutputs(usize, usize),

    /// Incorrect length, provided `{0}`, required `{1}`
    LengthMismatch(usize, usize),

    /// The value of inputs must equal the value of outputs plus the fee
    ValueNotConserved,

    /// A public key is not a valid Ristretto point
    KeyError,

    /// The range proof is missing or malformed
    MalformedRangeProof,

    /// The range proof failed to verify
    RangeProofError,

    /// Ring signature: `{0}`
    RingSignature(vela_crypto_ring_signature::Error),
}

impl From<KeyError> for Error {
    fn from(_src: KeyError) -> Self {
        Self::KeyError
    }
}

impl From<vela_crypto_ring_signature::Error> for Error {
    fn from(src: vela_crypto_ring_signature::Error) -> Self {
        Self::RingSignature(src)
    }
}

impl From<range_proofs::error::Error> for Error {
    fn from(_src: range_proofs::error::Error) -> Self {
        Self::RangeProofError
    }
}
