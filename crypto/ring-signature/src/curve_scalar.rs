// Copyright (c) 2025 The Vela Foundation

//! A serializable wrapper around a curve scalar.

use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// A Ristretto scalar as it appears inside serialized signatures.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Zeroize)]
pub struct CurveScalar {
    /// The wrapped scalar.
    pub scalar: Scalar,
}

impl ConstantTimeEq for CurveScalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}

// Signature responses are compared without an early exit.
impl PartialEq for CurveScalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for CurveScalar {}

impl CurveScalar {
    /// View the canonical little-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.scalar.as_bytes()
    }
}

impl From<Scalar> for CurveScalar {
    fn from(scalar: Scalar) -> Self {
        Self { scalar }
    }
}

impl AsRef<Scalar> for CurveScalar {
    fn as_ref(&self) -> &Scalar {
        &self.scalar
    }
}
