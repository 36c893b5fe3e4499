// Copyright (c) 2025 The Vela Foundation

//! Validator configuration.

use serde::{Deserialize, Serialize};
use vela_transaction_core::constants::{MAX_TX_SIZE, MINIMUM_FEE};

/// Configuration for a [`crate::TxValidator`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ValidatorConfig {
    /// The smallest fee a transaction may pay, in the smallest representable
    /// units.
    #[serde(default = "default_minimum_fee")]
    pub minimum_fee: u64,

    /// The largest canonically encoded transaction accepted, in bytes.
    #[serde(default = "default_max_tx_size")]
    pub max_tx_size: usize,

    /// Whether an unexpected ledger failure halts the validator.
    ///
    /// A halted validator rejects every transaction until the operator
    /// inspects the ledger and restarts the node. Disabling this is only
    /// sensible in tests.
    #[serde(default = "default_true")]
    pub halt_on_ledger_failure: bool,
}

fn default_minimum_fee() -> u64 {
    MINIMUM_FEE
}

fn default_max_tx_size() -> usize {
    MAX_TX_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            minimum_fee: MINIMUM_FEE,
            max_tx_size: MAX_TX_SIZE,
            halt_on_ledger_failure: true,
        }
    }
}

impl ValidatorConfig {
    /// Create a new builder with default settings.
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }
}

/// Builder for [`ValidatorConfig`].
#[derive(Clone, Debug, Default)]
pub struct ValidatorConfigBuilder {
    config: ValidatorConfig,
}

impl ValidatorConfigBuilder {
    /// Set the minimum transaction fee.
    pub fn minimum_fee(mut self, minimum_fee: u64) -> Self {
        self.config.minimum_fee = minimum_fee;
        self
    }

    /// Set the maximum encoded transaction size in bytes.
    pub fn max_tx_size(mut self, max_tx_size: usize) -> Self {
        self.config.max_tx_size = max_tx_size;
        self
    }

    /// Set whether a ledger failure halts the validator.
    pub fn halt_on_ledger_failure(mut self, halt: bool) -> Self {
        self.config.halt_on_ledger_failure = halt;
        self
    }

    /// Finish building the config.
    pub fn build(self) -> ValidatorConfig {
        self.config
    }
}
