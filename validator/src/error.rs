// Copyright (c) 2025 The Vela Foundation

//! Errors returned by the transaction validator.

use displaydoc::Display;
use vela_transaction_core::validation::TransactionValidationError;

/// An error which can occur while validating or recording a transaction.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum ValidatorError {
    /// The transaction failed validation: {0}
    Validation(TransactionValidationError),

    /// The validator has halted after a ledger failure
    Halted,

    /// The ledger failed in a way that indicates corruption: {0}
    LedgerCorrupted(vela_ledger_db::Error),
}

impl From<TransactionValidationError> for ValidatorError {
    fn from(src: TransactionValidationError) -> Self {
        Self::Validation(src)
    }
}

impl std::error::Error for ValidatorError {}
