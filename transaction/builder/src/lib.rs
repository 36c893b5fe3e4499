// Copyright (c) 2025 The Vela Foundation

//! Utilities for building and signing Vela transactions.

#![deny(missing_docs)]

mod error;
mod input_credentials;
mod transaction_builder;

pub use error::TxBuilderError;
pub use input_credentials::InputCredentials;
pub use transaction_builder::TransactionBuilder;
