// Copyright (c) 2025 The Vela Foundation

//! Admission control for transactions.
//!
//! The validator combines the intrinsic transaction checks from
//! `vela-transaction-core` with the ledger-dependent ones: every ring member
//! must be a real output, no key image may have been spent, and no output
//! public key may already exist. Checks run in stages, cheapest first, and a
//! rejected transaction reports the last [`ValidationStage`] it reached.
//! Accepted transactions are recorded in the ledger atomically, so two
//! concurrent transactions spending the same key image cannot both be
//! admitted.

#![deny(missing_docs)]

mod config;
mod error;
pub mod metrics;

pub use config::{ValidatorConfig, ValidatorConfigBuilder};
pub use error::ValidatorError;

use rand_core::{CryptoRng, RngCore};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};
use tracing::{debug, error, info};
use vela_ledger_db::Ledger;
use vela_transaction_core::{
    tx::Tx,
    validation::{validate_signature, validate_structure, TransactionValidationError},
};

/// The states a transaction moves through while being admitted.
///
/// A transaction only ever moves forward; a failed check leaves it at the
/// last stage it reached, which is reported in logs and metrics.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValidationStage {
    /// No checks have run.
    Unvalidated,
    /// Shape, fee, tombstone and ring membership checks passed.
    StructurallyChecked,
    /// The RingCT signature and range proofs verified.
    CryptoVerified,
    /// Key images and outputs were recorded in the ledger.
    Accepted,
}

impl ValidationStage {
    /// Low-cardinality label for logs and the rejection counter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::StructurallyChecked => "structurally_checked",
            Self::CryptoVerified => "crypto_verified",
            Self::Accepted => "accepted",
        }
    }
}

/// Validates transactions against a [`Ledger`] and records the ones that
/// pass.
pub struct TxValidator<L: Ledger> {
    ledger: Arc<L>,
    config: ValidatorConfig,
    halted: AtomicBool,
}

impl<L: Ledger> TxValidator<L> {
    /// Creates a validator over the given ledger.
    pub fn new(ledger: Arc<L>, config: ValidatorConfig) -> Self {
        Self {
            ledger,
            config,
            halted: AtomicBool::new(false),
        }
    }

    /// Whether the validator has halted after a ledger failure.
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// Runs every check against the transaction without recording anything.
    ///
    /// `current_block_index` is the index the transaction would be included
    /// at, used for the tombstone window. On success the transaction has
    /// reached [`ValidationStage::CryptoVerified`]; only recording it moves
    /// it to `Accepted`.
    pub fn validate_tx<R: RngCore + CryptoRng>(
        &self,
        tx: &Tx,
        current_block_index: u64,
        rng: &mut R,
    ) -> Result<ValidationStage, ValidatorError> {
        let mut stage = ValidationStage::Unvalidated;
        self.run_checks(tx, current_block_index, rng, &mut stage)?;
        Ok(stage)
    }

    /// Validates the transaction and, if it passes, records its key images
    /// and outputs in the ledger atomically.
    pub fn process_tx<R: RngCore + CryptoRng>(
        &self,
        tx: &Tx,
        current_block_index: u64,
        rng: &mut R,
    ) -> Result<(), ValidatorError> {
        let started_at = Instant::now();
        let mut stage = ValidationStage::Unvalidated;
        let result = self.process_tx_inner(tx, current_block_index, rng, &mut stage);
        metrics::VALIDATE_TX_TIME.observe(started_at.elapsed().as_secs_f64());

        match &result {
            Ok(()) => {
                metrics::TX_ACCEPTED.inc();
                if let Ok(num_key_images) = self.ledger.num_key_images() {
                    metrics::LEDGER_KEY_IMAGES.set(num_key_images as i64);
                }
                info!(tx_hash = %tx.tx_hash(), "transaction accepted");
            }
            Err(err) => {
                metrics::TX_REJECTED
                    .with_label_values(&[rejection_reason(err)])
                    .inc();
                debug!(
                    tx_hash = %tx.tx_hash(),
                    %err,
                    reached = stage.as_str(),
                    "transaction rejected"
                );
            }
        }
        result
    }

    fn process_tx_inner<R: RngCore + CryptoRng>(
        &self,
        tx: &Tx,
        current_block_index: u64,
        rng: &mut R,
        stage: &mut ValidationStage,
    ) -> Result<(), ValidatorError> {
        self.run_checks(tx, current_block_index, rng, stage)?;

        let key_images = tx.key_images();
        match self.ledger.record_spends(&key_images, &tx.prefix.outputs) {
            Ok(()) => {
                *stage = ValidationStage::Accepted;
                Ok(())
            }
            // The ledger re-checks under its own write transaction, so a
            // concurrent spend between validate and record surfaces here.
            Err(vela_ledger_db::Error::KeyImageAlreadySpent) => Err(
                TransactionValidationError::ContainsSpentKeyImage.into(),
            ),
            Err(vela_ledger_db::Error::DuplicateOutputPublicKey) => Err(
                TransactionValidationError::ContainsExistingOutputPublicKey.into(),
            ),
            Err(err) => Err(self.ledger_failure(err)),
        }
    }

    /// Advances the transaction through the validation stages, stopping at
    /// the first failed check. Ledger-state checks on key images and output
    /// public keys run last; they are repeated inside the ledger's own write
    /// transaction when the transaction is recorded.
    fn run_checks<R: RngCore + CryptoRng>(
        &self,
        tx: &Tx,
        current_block_index: u64,
        rng: &mut R,
        stage: &mut ValidationStage,
    ) -> Result<(), ValidatorError> {
        if self.is_halted() {
            return Err(ValidatorError::Halted);
        }

        validate_structure(
            tx,
            current_block_index,
            self.config.minimum_fee,
            self.config.max_tx_size,
        )?;
        self.check_ring_elements_in_ledger(tx)?;
        *stage = ValidationStage::StructurallyChecked;

        validate_signature(tx, rng)?;
        *stage = ValidationStage::CryptoVerified;

        self.check_key_images_unspent(tx)?;
        self.check_output_public_keys_fresh(tx)?;
        Ok(())
    }

    /// Every ring member must be an output the ledger knows, byte for byte.
    fn check_ring_elements_in_ledger(&self, tx: &Tx) -> Result<(), ValidatorError> {
        for tx_in in &tx.prefix.inputs {
            for ring_element in &tx_in.ring {
                let index = match self
                    .ledger
                    .get_tx_out_index_by_public_key(&ring_element.public_key)
                {
                    Ok(index) => index,
                    Err(vela_ledger_db::Error::NotFound) => {
                        return Err(TransactionValidationError::UnknownRingElement.into())
                    }
                    Err(err) => return Err(self.ledger_failure(err)),
                };

                let stored = self
                    .ledger
                    .get_tx_out_by_index(index)
                    .map_err(|err| self.ledger_failure(err))?;
                if stored != *ring_element {
                    return Err(TransactionValidationError::UnknownRingElement.into());
                }
            }
        }
        Ok(())
    }

    fn check_key_images_unspent(&self, tx: &Tx) -> Result<(), ValidatorError> {
        for key_image in tx.key_images() {
            if self
                .ledger
                .contains_key_image(&key_image)
                .map_err(|err| self.ledger_failure(err))?
            {
                return Err(TransactionValidationError::ContainsSpentKeyImage.into());
            }
        }
        Ok(())
    }

    fn check_output_public_keys_fresh(&self, tx: &Tx) -> Result<(), ValidatorError> {
        for public_key in tx.output_public_keys() {
            if self
                .ledger
                .contains_tx_out_public_key(&public_key)
                .map_err(|err| self.ledger_failure(err))?
            {
                return Err(TransactionValidationError::ContainsExistingOutputPublicKey.into());
            }
        }
        Ok(())
    }

    fn ledger_failure(&self, err: vela_ledger_db::Error) -> ValidatorError {
        error!(%err, "ledger failure during validation");
        if self.config.halt_on_ledger_failure {
            self.halted.store(true, Ordering::SeqCst);
            metrics::VALIDATOR_HALTED.set(1);
        }
        ValidatorError::LedgerCorrupted(err)
    }
}

/// Reason label for the rejection counter, one value per rejection code.
fn rejection_reason(err: &ValidatorError) -> &'static str {
    use TransactionValidationError as E;
    match err {
        ValidatorError::Halted => "halted",
        ValidatorError::LedgerCorrupted(_) => "ledger_corrupted",
        ValidatorError::Validation(reason) => match reason {
            E::NoInputs => "no_inputs",
            E::TooManyInputs => "too_many_inputs",
            E::InvalidTransactionSignature(_) => "invalid_signature",
            E::InsufficientRingSize => "insufficient_ring_size",
            E::UnequalRingSizes => "unequal_ring_sizes",
            E::TombstoneBlockExceeded => "tombstone_block_exceeded",
            E::TombstoneBlockTooFar => "tombstone_block_too_far",
            E::NoOutputs => "no_outputs",
            E::TooManyOutputs => "too_many_outputs",
            E::TransactionTooLarge => "transaction_too_large",
            E::DuplicateRingElements => "duplicate_ring_elements",
            E::UnsortedRingElements => "unsorted_ring_elements",
            E::UnsortedInputs => "unsorted_inputs",
            E::UnsortedOutputs => "unsorted_outputs",
            E::ContainsSpentKeyImage => "spent_key_image",
            E::DuplicateKeyImages => "duplicate_key_images",
            E::DuplicateOutputPublicKey => "duplicate_output_public_key",
            E::ContainsExistingOutputPublicKey => "existing_output_public_key",
            E::UnknownRingElement => "unknown_ring_element",
            E::TxFeeError => "fee_below_minimum",
        },
    }
}
