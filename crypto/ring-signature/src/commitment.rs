// Copyright (c) 2025 The Vela Foundation

//! Pedersen commitments to amounts.

use crate::{ring_signature::Error, PedersenGens};
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use hex_fmt::HexFmt;
use serde::{Deserialize, Serialize};

/// A Pedersen commitment in decompressed form, ready for group arithmetic.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Commitment {
    /// The commitment `value * B + blinding * B_blinding`.
    pub point: RistrettoPoint,
}

impl Commitment {
    /// Commit to `value` with the given blinding factor.
    pub fn new(value: u64, blinding: Scalar, generator: &PedersenGens) -> Self {
        Self {
            point: generator.commit(Scalar::from(value), blinding),
        }
    }
}

impl TryFrom<&CompressedCommitment> for Commitment {
    type Error = Error;

    fn try_from(src: &CompressedCommitment) -> Result<Self, Self::Error> {
        let point = src.point.decompress().ok_or(Error::InvalidCurvePoint)?;
        Ok(Self { point })
    }
}

/// A Pedersen commitment as it appears on the wire.
#[derive(Clone, Copy, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompressedCommitment {
    /// The compressed commitment point.
    pub point: CompressedRistretto,
}

impl CompressedCommitment {
    /// Commit to `value` with the given blinding factor.
    pub fn new(value: u64, blinding: Scalar, generator: &PedersenGens) -> Self {
        Self::from(&Commitment::new(value, blinding, generator))
    }

    /// View the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }
}

impl From<&Commitment> for CompressedCommitment {
    fn from(src: &Commitment) -> Self {
        Self {
            point: src.point.compress(),
        }
    }
}

impl From<CompressedRistretto> for CompressedCommitment {
    fn from(point: CompressedRistretto) -> Self {
        Self { point }
    }
}

impl AsRef<[u8; 32]> for CompressedCommitment {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl Ord for CompressedCommitment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialOrd for CompressedCommitment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for CompressedCommitment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl fmt::Debug for CompressedCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompressedCommitment({})", HexFmt(self.as_bytes()))
    }
}
