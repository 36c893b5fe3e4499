// Copyright (c) 2025 The Vela Foundation

//! Validation of the intrinsic rules of a transaction.
//!
//! Rules involving ledger state, such as spent key images, are the
//! validator's responsibility; everything here can be checked from the
//! transaction alone plus the current block index.

mod error;
mod validate;

pub use self::{
    error::{TransactionValidationError, TransactionValidationResult},
    validate::{
        validate, validate_inputs_are_sorted, validate_key_images_are_unique,
        validate_number_of_inputs, validate_number_of_outputs, validate_outputs_are_sorted,
        validate_outputs_public_keys_are_unique, validate_ring_elements_are_sorted,
        validate_ring_elements_are_unique, validate_ring_sizes, validate_signature,
        validate_structure, validate_tombstone, validate_transaction_fee,
        validate_transaction_size,
    },
};
