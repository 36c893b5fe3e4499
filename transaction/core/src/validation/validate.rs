// Copyright (c) 2025 The Vela Foundation

//! Transaction validation.

use super::error::{TransactionValidationError, TransactionValidationResult};
use crate::{
    constants::{MAX_INPUTS, MAX_OUTPUTS, MAX_TOMBSTONE_BLOCKS, MAX_TX_SIZE, RING_SIZE},
    tx::{Tx, TxPrefix},
};
use rand_core::{CryptoRng, RngCore};
use vela_common::HashSet;

/// Determines if the transaction is valid, with respect to the provided
/// context.
///
/// # Arguments
/// * `tx` - A pending transaction.
/// * `current_block_index` - The index of the current block that is being
///   built.
/// * `minimum_fee` - The smallest fee the network accepts.
/// * `csprng` - Cryptographically secure random number generator.
///
/// Note: the transaction must also not contain a key image that has
/// previously been spent, nor an output public key that already appears in
/// the ledger. Those checks require ledger state and are performed by the
/// validator, not here.
pub fn validate<R: RngCore + CryptoRng>(
    tx: &Tx,
    current_block_index: u64,
    minimum_fee: u64,
    csprng: &mut R,
) -> TransactionValidationResult<()> {
    validate_structure(tx, current_block_index, minimum_fee, MAX_TX_SIZE)?;

    validate_signature(tx, csprng)?;

    Ok(())
}

/// Everything that can be decided from the transaction's shape alone, without
/// verifying any cryptography.
///
/// These checks are cheap, so they run before the signature is touched.
pub fn validate_structure(
    tx: &Tx,
    current_block_index: u64,
    minimum_fee: u64,
    maximum_tx_size: usize,
) -> TransactionValidationResult<()> {
    validate_number_of_inputs(&tx.prefix, MAX_INPUTS)?;

    validate_number_of_outputs(&tx.prefix, MAX_OUTPUTS)?;

    validate_transaction_size(tx, maximum_tx_size)?;

    validate_ring_sizes(&tx.prefix, RING_SIZE)?;

    validate_ring_elements_are_unique(&tx.prefix)?;

    validate_ring_elements_are_sorted(&tx.prefix)?;

    validate_inputs_are_sorted(&tx.prefix)?;

    validate_outputs_are_sorted(&tx.prefix)?;

    validate_key_images_are_unique(tx)?;

    validate_outputs_public_keys_are_unique(tx)?;

    validate_transaction_fee(tx, minimum_fee)?;

    validate_tombstone(current_block_index, tx.prefix.tombstone_block)?;

    Ok(())
}

/// The canonical encoding of the transaction must fit in `maximum_size`
/// bytes.
pub fn validate_transaction_size(tx: &Tx, maximum_size: usize) -> TransactionValidationResult<()> {
    let size = vela_util_serial::encode(tx)
        .expect("canonical encoding of a wire type is infallible")
        .len();
    if size > maximum_size {
        return Err(TransactionValidationError::TransactionTooLarge);
    }

    Ok(())
}

/// The transaction must have at least one input, and no more than the maximum
/// allowed number of inputs.
pub fn validate_number_of_inputs(
    tx_prefix: &TxPrefix,
    maximum_allowed_inputs: u64,
) -> TransactionValidationResult<()> {
    let num_inputs = tx_prefix.inputs.len();

    // Each transaction must have at least one input.
    if num_inputs == 0 {
        return Err(TransactionValidationError::NoInputs);
    }

    // Each transaction must have no more than the maximum allowed number of inputs.
    if num_inputs > maximum_allowed_inputs as usize {
        return Err(TransactionValidationError::TooManyInputs);
    }

    Ok(())
}

/// The transaction must have at least one output.
pub fn validate_number_of_outputs(
    tx_prefix: &TxPrefix,
    maximum_allowed_outputs: u64,
) -> TransactionValidationResult<()> {
    let num_outputs = tx_prefix.outputs.len();

    // Each transaction must have at least one output.
    if num_outputs == 0 {
        return Err(TransactionValidationError::NoOutputs);
    }

    // Each transaction must have no more than the maximum allowed number of
    // outputs.
    if num_outputs > maximum_allowed_outputs as usize {
        return Err(TransactionValidationError::TooManyOutputs);
    }

    Ok(())
}

/// Each input must contain a ring of at least `minimum_ring_size` elements,
/// and all rings in a transaction must have the same size.
pub fn validate_ring_sizes(
    tx_prefix: &TxPrefix,
    minimum_ring_size: usize,
) -> TransactionValidationResult<()> {
    for input in &tx_prefix.inputs {
        if input.ring.len() < minimum_ring_size {
            return Err(TransactionValidationError::InsufficientRingSize);
        }
        if input.ring.len() != tx_prefix.inputs[0].ring.len() {
            return Err(TransactionValidationError::UnequalRingSizes);
        }
    }
    Ok(())
}

/// Ring elements must be unique across all of the transaction's rings.
pub fn validate_ring_elements_are_unique(tx_prefix: &TxPrefix) -> TransactionValidationResult<()> {
    let mut ring_elements = HashSet::default();
    for input in tx_prefix.inputs.iter() {
        for elem in input.ring.iter() {
            if !ring_elements.insert(elem) {
                return Err(TransactionValidationError::DuplicateRingElements);
            }
        }
    }
    Ok(())
}

/// Elements in a ring must be sorted.
pub fn validate_ring_elements_are_sorted(tx_prefix: &TxPrefix) -> TransactionValidationResult<()> {
    for tx_in in &tx_prefix.inputs {
        check_sorted(
            &tx_in.ring,
            |a, b| a.public_key < b.public_key,
            TransactionValidationError::UnsortedRingElements,
        )?;
    }

    Ok(())
}

/// Inputs must be sorted by the public key of the first ring element of each
/// input.
pub fn validate_inputs_are_sorted(tx_prefix: &TxPrefix) -> TransactionValidationResult<()> {
    check_sorted(
        &tx_prefix.inputs,
        |a, b| {
            !a.ring.is_empty() && !b.ring.is_empty() && a.ring[0].public_key < b.ring[0].public_key
        },
        TransactionValidationError::UnsortedInputs,
    )
}

/// Outputs must be sorted by the tx public key.
pub fn validate_outputs_are_sorted(tx_prefix: &TxPrefix) -> TransactionValidationResult<()> {
    check_sorted(
        &tx_prefix.outputs,
        |a, b| a.public_key < b.public_key,
        TransactionValidationError::UnsortedOutputs,
    )
}

/// All key images within the transaction must be unique.
pub fn validate_key_images_are_unique(tx: &Tx) -> TransactionValidationResult<()> {
    check_unique(
        &tx.key_images(),
        TransactionValidationError::DuplicateKeyImages,
    )
}

/// All output public keys within the transaction must be unique.
pub fn validate_outputs_public_keys_are_unique(tx: &Tx) -> TransactionValidationResult<()> {
    check_unique(
        &tx.output_public_keys(),
        TransactionValidationError::DuplicateOutputPublicKey,
    )
}

/// Verifies the transaction signature.
///
/// A valid signature implies that:
/// * tx.prefix has not been modified,
/// * The signer owns one element in each input ring,
/// * Each key image corresponds to the spent ring element,
/// * The outputs have values in [0,2^64),
/// * The transaction does not create or destroy value.
pub fn validate_signature<R: RngCore + CryptoRng>(
    tx: &Tx,
    rng: &mut R,
) -> TransactionValidationResult<()> {
    let rings = tx.prefix.get_input_rings();
    let output_commitments = tx.prefix.output_commitments();

    tx.signature
        .verify(
            tx.prefix.hash().as_bytes(),
            &rings,
            &output_commitments,
            tx.prefix.fee,
            rng,
        )
        .map_err(TransactionValidationError::InvalidTransactionSignature)
}

/// The fee amount must be greater than or equal to the given minimum fee.
pub fn validate_transaction_fee(tx: &Tx, minimum_fee: u64) -> TransactionValidationResult<()> {
    if tx.prefix.fee < minimum_fee {
        Err(TransactionValidationError::TxFeeError)
    } else {
        Ok(())
    }
}

/// The transaction must be not have expired, or be too long-lived.
///
/// # Arguments
/// * `current_block_index` - The index of the block currently being built.
/// * `tombstone_block_index` - The block index at which this transaction is no
///   longer considered valid.
pub fn validate_tombstone(
    current_block_index: u64,
    tombstone_block_index: u64,
) -> TransactionValidationResult<()> {
    if current_block_index >= tombstone_block_index {
        return Err(TransactionValidationError::TombstoneBlockExceeded);
    }

    let limit = current_block_index + MAX_TOMBSTONE_BLOCKS;
    if tombstone_block_index > limit {
        return Err(TransactionValidationError::TombstoneBlockTooFar);
    }

    Ok(())
}

fn check_sorted<T>(
    values: &[T],
    ordered: fn(&T, &T) -> bool,
    err: TransactionValidationError,
) -> TransactionValidationResult<()> {
    if !values.windows(2).all(|pair| ordered(&pair[0], &pair[1])) {
        return Err(err);
    }

    Ok(())
}

fn check_unique<T: core::hash::Hash + Eq>(
    values: &[T],
    err: TransactionValidationError,
) -> TransactionValidationResult<()> {
    let mut uniques = HashSet::default();
    for value in values.iter() {
        if !uniques.insert(value) {
            return Err(err);
        }
    }

    Ok(())
}
