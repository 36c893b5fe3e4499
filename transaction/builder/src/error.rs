// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur while building a transaction.

use displaydoc::Display;
use vela_crypto_keys::KeyError;
use vela_transaction_core::{ring_ct, AmountError, NewTxError};

/// An error which can occur while building a transaction.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum TxBuilderError {
    /// The ring is empty, or the real index is out of bounds
    InvalidRingSize,

    /// The transaction has no inputs
    NoInputs,

    /// The transaction has no outputs
    NoOutputs,

    /// Key: `{0}`
    KeyError(KeyError),

    /// Amount: `{0}`
    Amount(AmountError),

    /// Output creation: `{0}`
    NewTx(NewTxError),

    /// Signing: `{0}`
    RingCt(ring_ct::Error),
}

impl From<KeyError> for TxBuilderError {
    fn from(src: KeyError) -> Self {
        Self::KeyError(src)
    }
}

impl From<AmountError> for TxBuilderError {
    fn from(src: AmountError) -> Self {
        Self::Amount(src)
    }
}

impl From<NewTxError> for TxBuilderError {
    fn from(src: NewTxError) -> Self {
        Self::NewTx(src)
    }
}

impl From<ring_ct::Error> for TxBuilderError {
    fn from(src: ring_ct::Error) -> Self {
        Self::RingCt(src)
    }
}
