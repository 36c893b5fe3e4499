// Copyright (c) 2025 The Vela Foundation

//! A trait for constructing an object from a cryptographic random number
//! generator.

#![no_std]

use rand_core::{CryptoRng, RngCore};

/// Construct `Self` from randomness.
pub trait FromRandom: Sized {
    /// Sample a new `Self` from the given csprng.
    fn from_random<R: RngCore + CryptoRng>(csprng: &mut R) -> Self;
}
