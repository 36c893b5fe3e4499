// Copyright (c) 2025 The Vela Foundation

//! Errors which can occur when configuring the router.

use displaydoc::Display;

/// An error which can occur when configuring Dandelion++ propagation.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum DandelionError {
    /// Stem probability must be within [0, 1], got {0}
    InvalidStemProbability(f64),
}

impl std::error::Error for DandelionError {}
