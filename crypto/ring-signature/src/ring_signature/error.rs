// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur in connection to ring signatures.

use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// An error which can occur when signing or verifying a RingMLSAG.
#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Error {
    /// Incorrect length for array copy, provided `{0}`, required `{1}`.
    LengthMismatch(usize, usize),

    /// Index out of bounds
    IndexOutOfBounds,

    /// Invalid curve point
    InvalidCurvePoint,

    /// The signature was not able to be validated
    InvalidSignature,

    /// Failed to compress/decompress a KeyImage
    InvalidKeyImage,

    /// Value not conserved
    ValueNotConserved,
}

impl From<vela_crypto_keys::KeyError> for Error {
    fn from(_src: vela_crypto_keys::KeyError) -> Self {
        Self::InvalidCurvePoint
    }
}
