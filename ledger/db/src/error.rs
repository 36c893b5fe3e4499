// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur when accessing the ledger database.

use displaydoc::Display;
use vela_util_serial::{DecodeError, EncodeError};

/// An error which can occur when accessing the ledger database.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Error {
    /// The requested record was not found
    NotFound,

    /// A key image in the transaction was already spent
    KeyImageAlreadySpent,

    /// An output with the same public key already exists
    DuplicateOutputPublicKey,

    /// A stored record could not be decoded
    Serialization,

    /// LMDB: `{0}`
    Lmdb(lmdb::Error),
}

impl From<lmdb::Error> for Error {
    fn from(src: lmdb::Error) -> Self {
        match src {
            lmdb::Error::NotFound => Self::NotFound,
            lmdb::Error::KeyExist => Self::DuplicateOutputPublicKey,
            other => Self::Lmdb(other),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(_src: EncodeError) -> Self {
        Self::Serialization
    }
}

impl From<DecodeError> for Error {
    fn from(_src: DecodeError) -> Self {
        Self::Serialization
    }
}

impl std::error::Error for Error {}
