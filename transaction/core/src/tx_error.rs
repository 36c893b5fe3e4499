// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur when building transaction pieces.

use crate::AmountError;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use vela_crypto_keys::KeyError;

/// An error which can occur when creating a new `TxOut`.
#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum NewTxError {
    /// Amount: `{0}`
    Amount(AmountError),

    /// Key: `{0}`
    Key(KeyError),

    /// The view key does not match the output, or is outside its window
    ViewKeyMismatch,
}

impl From<AmountError> for NewTxError {
    fn from(src: AmountError) -> Self {
        Self::Amount(src)
    }
}

impl From<KeyError> for NewTxError {
    fn from(src: KeyError) -> Self {
        Self::Key(src)
    }
}
