// Copyright (c) 2025 The Vela Foundation

//! Prometheus metrics for the transaction validator.

use lazy_static::lazy_static;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

lazy_static! {
    /// Transactions accepted and recorded in the ledger.
    pub static ref TX_ACCEPTED: IntCounter = IntCounter::new(
        "vela_validator_tx_accepted_total",
        "Total transactions accepted by the validator"
    ).expect("Failed to create tx_accepted metric");

    /// Transactions rejected, labelled by the rejection reason code.
    pub static ref TX_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "vela_validator_tx_rejected_total",
            "Total transactions rejected by the validator"
        ),
        &["reason"],
    ).expect("Failed to create tx_rejected metric");

    /// Key images recorded in the ledger, updated after each accepted
    /// transaction.
    pub static ref LEDGER_KEY_IMAGES: IntGauge = IntGauge::new(
        "vela_validator_ledger_key_images",
        "Number of key images recorded in the ledger"
    ).expect("Failed to create ledger_key_images metric");

    /// End-to-end validation latency in seconds.
    pub static ref VALIDATE_TX_TIME: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "vela_validator_validate_tx_seconds",
            "Time spent validating a transaction in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0])
    ).expect("Failed to create validate_tx_time metric");

    /// 1 when the validator has halted after a ledger failure, 0 otherwise.
    pub static ref VALIDATOR_HALTED: IntGauge = IntGauge::new(
        "vela_validator_halted",
        "Whether the validator has halted after a ledger failure"
    ).expect("Failed to create validator_halted metric");
}

/// Register all validator metrics with a Prometheus registry.
///
/// Call once during node startup.
pub fn register_validator_metrics(registry: &Registry) {
    registry
        .register(Box::new(TX_ACCEPTED.clone()))
        .expect("Failed to register tx_accepted");
    registry
        .register(Box::new(TX_REJECTED.clone()))
        .expect("Failed to register tx_rejected");
    registry
        .register(Box::new(LEDGER_KEY_IMAGES.clone()))
        .expect("Failed to register ledger_key_images");
    registry
        .register(Box::new(VALIDATE_TX_TIME.clone()))
        .expect("Failed to register validate_tx_time");
    registry
        .register(Box::new(VALIDATOR_HALTED.clone()))
        .expect("Failed to register validator_halted");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_counter_tracks_reasons() {
        let before = TX_REJECTED.with_label_values(&["spent_key_image"]).get();
        TX_REJECTED.with_label_values(&["spent_key_image"]).inc();
        assert_eq!(
            TX_REJECTED.with_label_values(&["spent_key_image"]).get(),
            before + 1
        );
    }

    #[test]
    fn registration_succeeds_on_fresh_registry() {
        let registry = Registry::new();
        register_validator_metrics(&registry);
        assert!(!registry.gather().is_empty());
    }
}
