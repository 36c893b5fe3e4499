// Copyright (c) 2025 The Vela Foundation

use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// Type alias for transaction validation results.
pub type TransactionValidationResult<T> = Result<T, TransactionValidationError>;

/// Reasons why a single transaction may fail to be valid with respect to the
/// current ledger.
#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TransactionValidationError {
    /// A transaction must have at least one input.
    NoInputs,

    /**
     * A transaction must have no more than the maximum allowed number of
     * inputs.
     */
    TooManyInputs,

    /// Invalid RingCT signature: `{0}`
    InvalidTransactionSignature(crate::ring_ct::Error),

    /**
     * Each input must contain a ring with no fewer than the minimum number
     * of elements.
     */
    InsufficientRingSize,

    /// All rings in a transaction must be of the same size.
    UnequalRingSizes,

    /// Number of blocks in ledger exceeds the tombstone block number.
    TombstoneBlockExceeded,

    /// Tombstone block is too far in the future.
    TombstoneBlockTooFar,

    /// Must have at least one output.
    NoOutputs,

    /**
     * A transaction must have no more than the maximum allowed number of
     * outputs.
     */
    TooManyOutputs,

    /// The encoded transaction exceeds the maximum allowed size.
    TransactionTooLarge,

    /// All elements in all rings within the transaction must be unique.
    DuplicateRingElements,

    /// The elements of each ring must be sorted.
    UnsortedRingElements,

    /**
     * Inputs must be sorted by the public key of the first ring element of
     * each input.
     */
    UnsortedInputs,

    /// Outputs must be sorted by public key, ascending.
    UnsortedOutputs,

    /// Contains a Key Image that has previously been spent.
    ContainsSpentKeyImage,

    /// Key Images within the transaction must be unique.
    DuplicateKeyImages,

    /// Output public keys in the transaction must be unique.
    DuplicateOutputPublicKey,

    /**
     * Contains an output public key that has previously appeared in the
     * ledger.
     */
    ContainsExistingOutputPublicKey,

    /// A ring element is not present in the ledger.
    UnknownRingElement,

    /// An error occurred while checking transaction fees.
    TxFeeError,
}
