// Copyright (c) 2025 The Vela Foundation

//! Vela ring-confidential transaction signatures.

mod error;
mod rct_full;

pub use self::{
    error::Error,
    rct_full::{OutputSecret, SignableInputRing, SignatureRctFull},
};
