// Copyright (c) 2025 The Vela Foundation

//! Ristretto key wrappers.

use crate::KeyError;
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use hex_fmt::HexFmt;
use rand_core::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use vela_util_from_random::FromRandom;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Ristretto private key: a scalar.
#[derive(Clone, Copy, Zeroize)]
pub struct RistrettoPrivate(Scalar);

impl RistrettoPrivate {
    /// View the underlying scalar bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl From<Scalar> for RistrettoPrivate {
    fn from(scalar: Scalar) -> Self {
        Self(scalar)
    }
}

impl AsRef<Scalar> for RistrettoPrivate {
    fn as_ref(&self) -> &Scalar {
        &self.0
    }
}

impl FromRandom for RistrettoPrivate {
    fn from_random<R: RngCore + CryptoRng>(csprng: &mut R) -> Self {
        Self(Scalar::random(csprng))
    }
}

impl TryFrom<&[u8]> for RistrettoPrivate {
    type Error = KeyError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = src
            .try_into()
            .map_err(|_e| KeyError::LengthMismatch(src.len(), 32))?;
        let scalar = Option::<Scalar>::from(Scalar::from_canonical_bytes(bytes))
            .ok_or(KeyError::InvalidPoint)?;
        Ok(Self(scalar))
    }
}

impl ConstantTimeEq for RistrettoPrivate {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

// Key material is never compared with an early-exit equality.
impl PartialEq for RistrettoPrivate {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for RistrettoPrivate {}

// Never print key material.
impl fmt::Debug for RistrettoPrivate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RistrettoPrivate(<redacted>)")
    }
}

#[cfg(feature = "serde")]
impl Serialize for RistrettoPrivate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RistrettoPrivate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; 32]>::deserialize(deserializer)?;
        Self::try_from(&bytes[..]).map_err(serde::de::Error::custom)
    }
}

/// A Ristretto public key: a decompressed, valid group element.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RistrettoPublic(RistrettoPoint);

impl RistrettoPublic {
    /// Compress to wire form.
    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    /// The compressed bytes of this key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }
}

impl From<&RistrettoPrivate> for RistrettoPublic {
    fn from(private: &RistrettoPrivate) -> Self {
        Self(private.0 * RISTRETTO_BASEPOINT_POINT)
    }
}

impl From<RistrettoPoint> for RistrettoPublic {
    fn from(point: RistrettoPoint) -> Self {
        Self(point)
    }
}

impl AsRef<RistrettoPoint> for RistrettoPublic {
    fn as_ref(&self) -> &RistrettoPoint {
        &self.0
    }
}

impl FromRandom for RistrettoPublic {
    fn from_random<R: RngCore + CryptoRng>(csprng: &mut R) -> Self {
        Self(RistrettoPoint::random(csprng))
    }
}

impl TryFrom<&CompressedRistrettoPublic> for RistrettoPublic {
    type Error = KeyError;

    fn try_from(src: &CompressedRistrettoPublic) -> Result<Self, Self::Error> {
        Ok(Self(src.0.decompress().ok_or(KeyError::InvalidPoint)?))
    }
}

impl TryFrom<&[u8]> for RistrettoPublic {
    type Error = KeyError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        RistrettoPublic::try_from(&CompressedRistrettoPublic::try_from(src)?)
    }
}

// Byte-wise over the compressed form, for canonical sorting of addresses.
impl Ord for RistrettoPublic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bytes().cmp(&other.to_bytes())
    }
}

impl PartialOrd for RistrettoPublic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for RistrettoPublic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state)
    }
}

#[cfg(feature = "serde")]
impl Serialize for RistrettoPublic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RistrettoPublic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; 32]>::deserialize(deserializer)?;
        Self::try_from(&bytes[..]).map_err(serde::de::Error::custom)
    }
}

/// A compressed Ristretto public key, as it appears on the wire.
///
/// Validity as a group element is only established when the key is
/// decompressed into a [`RistrettoPublic`].
#[derive(Clone, Copy, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct CompressedRistrettoPublic(CompressedRistretto);

impl CompressedRistrettoPublic {
    /// View the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl From<RistrettoPublic> for CompressedRistrettoPublic {
    fn from(src: RistrettoPublic) -> Self {
        Self(src.0.compress())
    }
}

impl From<&RistrettoPublic> for CompressedRistrettoPublic {
    fn from(src: &RistrettoPublic) -> Self {
        Self(src.0.compress())
    }
}

impl From<CompressedRistretto> for CompressedRistrettoPublic {
    fn from(point: CompressedRistretto) -> Self {
        Self(point)
    }
}

impl From<[u8; 32]> for CompressedRistrettoPublic {
    fn from(src: [u8; 32]) -> Self {
        Self(CompressedRistretto(src))
    }
}

impl TryFrom<&[u8]> for CompressedRistrettoPublic {
    type Error = KeyError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = src
            .try_into()
            .map_err(|_e| KeyError::LengthMismatch(src.len(), 32))?;
        Ok(Self(CompressedRistretto(bytes)))
    }
}

impl AsRef<CompressedRistretto> for CompressedRistrettoPublic {
    fn as_ref(&self) -> &CompressedRistretto {
        &self.0
    }
}

impl AsRef<[u8; 32]> for CompressedRistrettoPublic {
    fn as_ref(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl AsRef<[u8]> for CompressedRistrettoPublic {
    fn as_ref(&self) -> &[u8] {
        &self.0.as_bytes()[..]
    }
}

impl FromRandom for CompressedRistrettoPublic {
    fn from_random<R: RngCore + CryptoRng>(csprng: &mut R) -> Self {
        Self(RistrettoPoint::random(csprng).compress())
    }
}

// Byte-wise ordering, used by the canonical transaction sorting rules.
impl Ord for CompressedRistrettoPublic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialOrd for CompressedRistrettoPublic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for CompressedRistrettoPublic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl fmt::Debug for CompressedRistrettoPublic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompressedRistrettoPublic({})", HexFmt(self.as_bytes()))
    }
}

impl fmt::Display for CompressedRistrettoPublic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HexFmt(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util_test_helper::get_seeded_rng;

    #[test]
    fn public_key_round_trips_through_compression() {
        let mut rng = get_seeded_rng();
        let private = RistrettoPrivate::from_random(&mut rng);
        let public = RistrettoPublic::from(&private);

        let compressed = CompressedRistrettoPublic::from(&public);
        let recovered = RistrettoPublic::try_from(&compressed).unwrap();
        assert_eq!(public, recovered);
    }

    #[test]
    fn invalid_point_is_rejected() {
        // Not every 32-byte string is a canonical Ristretto encoding.
        let mut bytes = [0xffu8; 32];
        bytes[31] = 0x7f;
        let compressed = CompressedRistrettoPublic::from(bytes);
        assert_eq!(
            RistrettoPublic::try_from(&compressed),
            Err(KeyError::InvalidPoint)
        );
    }

    #[test]
    fn short_slice_is_rejected() {
        assert_eq!(
            CompressedRistrettoPublic::try_from(&[0u8; 16][..]),
            Err(KeyError::LengthMismatch(16, 32))
        );
    }

    #[test]
    fn private_keys_compare_by_scalar() {
        let mut rng = get_seeded_rng();
        let a = RistrettoPrivate::from_random(&mut rng);
        let b = RistrettoPrivate::from_random(&mut rng);

        assert!(bool::from(a.ct_eq(&a)));
        assert!(!bool::from(a.ct_eq(&b)));
        assert_eq!(a, RistrettoPrivate::try_from(&a.to_bytes()[..]).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn private_key_debug_is_redacted() {
        let mut rng = get_seeded_rng();
        let private = RistrettoPrivate::from_random(&mut rng);
        let rendered = alloc::format!("{private:?}");
        assert!(!rendered.contains("Scalar"));
    }
}

#[cfg(test)]
extern crate alloc;
