// Copyright (c) 2025 The Vela Foundation

//! Hash functions used across the Vela crates.
//!
//! Blake2b is the domain-separated workhorse: 512-bit output where a hash is
//! mapped onto a scalar or curve point, 256-bit output for identifiers.

#![no_std]
#![deny(missing_docs)]

pub use digest::Digest;

use blake2::Blake2b;
use digest::consts::{U32, U64};

/// Blake2b with 256 bits of output.
pub type Blake2b256 = Blake2b<U32>;

/// Blake2b with 512 bits of output.
pub type Blake2b512 = Blake2b<U64>;
