// Copyright (c) 2025 The Vela Foundation

//! Vela key types over the Ristretto group.
//!
//! These newtypes wrap curve25519-dalek so that the rest of the codebase
//! never handles raw points or scalars: compressed keys are validated on
//! decompression, private keys zeroize themselves, and byte-wise orderings
//! are available for the canonical sorting rules of the transaction format.

#![no_std]
#![deny(missing_docs)]
#![allow(non_snake_case)]

mod error;
mod ristretto;

pub use error::KeyError;
pub use ristretto::{CompressedRistrettoPublic, RistrettoPrivate, RistrettoPublic};
