// Copyright (c) 2025 The Vela Foundation

use displaydoc::Display;

/// An error which can occur when handling key material.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum KeyError {
    /// Incorrect key length, provided `{0}`, required `{1}`
    LengthMismatch(usize, usize),

    /// The bytes are not a valid Ristretto point
    InvalidPoint,
}
