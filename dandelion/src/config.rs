// Copyright (c) 2025 The Vela Foundation

//! Dandelion++ configuration.

use crate::DandelionError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`crate::DandelionRouter`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DandelionConfig {
    /// Probability that a stem relay continues stemming rather than
    /// switching to fluff.
    #[serde(default = "default_stem_probability")]
    pub stem_probability: f64,

    /// Hop-count ceiling; a transaction that has stemmed this many hops is
    /// fluffed regardless of the random outcome.
    #[serde(default = "default_max_stem_hops")]
    pub max_stem_hops: u32,

    /// Seconds a stem relay waits to see its forwarded transaction again
    /// before fluffing it itself.
    #[serde(default = "default_embargo_timeout_secs")]
    pub embargo_timeout_secs: u64,

    /// Seconds between stem-successor rotations.
    #[serde(default = "default_epoch_duration_secs")]
    pub epoch_duration_secs: u64,
}

fn default_stem_probability() -> f64 {
    0.9
}

fn default_max_stem_hops() -> u32 {
    10
}

fn default_embargo_timeout_secs() -> u64 {
    30
}

fn default_epoch_duration_secs() -> u64 {
    600
}

impl Default for DandelionConfig {
    fn default() -> Self {
        Self {
            stem_probability: default_stem_probability(),
            max_stem_hops: default_max_stem_hops(),
            embargo_timeout_secs: default_embargo_timeout_secs(),
            epoch_duration_secs: default_epoch_duration_secs(),
        }
    }
}

impl DandelionConfig {
    /// Create a new builder with default settings.
    pub fn builder() -> DandelionConfigBuilder {
        DandelionConfigBuilder::default()
    }

    /// The embargo timeout as a [`Duration`].
    pub fn embargo_timeout(&self) -> Duration {
        Duration::from_secs(self.embargo_timeout_secs)
    }

    /// The epoch duration as a [`Duration`].
    pub fn epoch_duration(&self) -> Duration {
        Duration::from_secs(self.epoch_duration_secs)
    }

    /// Checks that the configured values are usable.
    pub fn validate(&self) -> Result<(), DandelionError> {
        if !(0.0..=1.0).contains(&self.stem_probability) {
            return Err(DandelionError::InvalidStemProbability(
                self.stem_probability,
            ));
        }
        Ok(())
    }
}

/// Builder for [`DandelionConfig`].
#[derive(Clone, Debug, Default)]
pub struct DandelionConfigBuilder {
    config: DandelionConfig,
}

impl DandelionConfigBuilder {
    /// Set the stem-continue probability.
    pub fn stem_probability(mut self, stem_probability: f64) -> Self {
        self.config.stem_probability = stem_probability;
        self
    }

    /// Set the hop-count ceiling.
    pub fn max_stem_hops(mut self, max_stem_hops: u32) -> Self {
        self.config.max_stem_hops = max_stem_hops;
        self
    }

    /// Set the embargo timeout in seconds.
    pub fn embargo_timeout_secs(mut self, secs: u64) -> Self {
        self.config.embargo_timeout_secs = secs;
        self
    }

    /// Set the epoch duration in seconds.
    pub fn epoch_duration_secs(mut self, secs: u64) -> Self {
        self.config.epoch_duration_secs = secs;
        self
    }

    /// Finish building the config.
    pub fn build(self) -> DandelionConfig {
        self.config
    }
}
