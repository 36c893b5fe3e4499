// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur when proving or checking range proofs.

use bulletproofs_og::ProofError;
use displaydoc::Display;

/// An error which can occur when making or checking a range proof.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Error {
    /// The slice of values could not be padded to a power of two
    Resize,

    /// The proof failed: `{0}`
    Proof(ProofError),
}

impl From<ProofError> for Error {
    fn from(src: ProofError) -> Self {
        Self::Proof(src)
    }
}
