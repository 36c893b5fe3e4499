// Copyright (c) 2025 The Vela Foundation

use super::{hash_to_point, Error, Scalar};
use alloc::vec::Vec;
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};
use curve25519_dalek::ristretto::CompressedRistretto;
use hex_fmt::HexFmt;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};
use vela_crypto_keys::{RistrettoPrivate, RistrettoPublic};
use zeroize::Zeroize;

/// The "image" of a private key `x`: I = x * Hp(x * G) = x * Hp(P).
///
/// A key image is deterministic for a given one-time private key, so
/// recording spent images detects double spends without revealing which ring
/// member signed.
#[derive(Clone, Copy, Default, Deserialize, Serialize, Zeroize)]
pub struct KeyImage {
    /// The curve point corresponding to the key image.
    pub point: CompressedRistretto,
}

impl KeyImage {
    /// View the underlying `CompressedRistretto` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }

    /// Copies `self` into a new Vec.
    pub fn to_vec(&self) -> Vec<u8> {
        self.point.as_bytes().to_vec()
    }
}

impl From<&RistrettoPrivate> for KeyImage {
    #[allow(non_snake_case)]
    fn from(x: &RistrettoPrivate) -> Self {
        let P = RistrettoPublic::from(x);
        let Hp = hash_to_point(&P);
        let point = x.as_ref() * Hp;
        KeyImage {
            point: point.compress(),
        }
    }
}

// Many tests use this
impl From<u64> for KeyImage {
    fn from(n: u64) -> Self {
        let private_key = RistrettoPrivate::from(Scalar::from(n));
        Self::from(&private_key)
    }
}

impl TryFrom<[u8; 32]> for KeyImage {
    type Error = Error;
    fn try_from(src: [u8; 32]) -> Result<Self, Self::Error> {
        Ok(Self {
            point: CompressedRistretto(src),
        })
    }
}

impl TryFrom<&[u8]> for KeyImage {
    type Error = Error;
    fn try_from(src: &[u8]) -> Result<Self, Error> {
        if src.len() != 32 {
            return Err(Error::LengthMismatch(src.len(), 32));
        }
        let point =
            CompressedRistretto::from_slice(src).map_err(|_e| Error::InvalidCurvePoint)?;
        Ok(Self { point })
    }
}

impl AsRef<CompressedRistretto> for KeyImage {
    fn as_ref(&self) -> &CompressedRistretto {
        &self.point
    }
}

impl AsRef<[u8; 32]> for KeyImage {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for KeyImage {
    fn as_ref(&self) -> &[u8] {
        &self.as_bytes()[..]
    }
}

impl ConstantTimeEq for KeyImage {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl PartialEq for KeyImage {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for KeyImage {}

impl Ord for KeyImage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialOrd for KeyImage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for KeyImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl fmt::Debug for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyImage({})", HexFmt(self.as_bytes()))
    }
}

impl fmt::Display for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HexFmt(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util_from_random::FromRandom;

    #[test]
    fn test_key_image_from_private_key() {
        let mut rng = rand_core::OsRng;
        let private = RistrettoPrivate::from_random(&mut rng);
        let key_image = KeyImage::from(&private);

        // Key image should be 32 bytes
        assert_eq!(key_image.as_bytes().len(), 32);

        // Same private key should produce same key image
        let key_image2 = KeyImage::from(&private);
        assert_eq!(key_image, key_image2);
    }

    #[test]
    fn test_different_keys_different_images() {
        let mut rng = rand_core::OsRng;
        let private1 = RistrettoPrivate::from_random(&mut rng);
        let private2 = RistrettoPrivate::from_random(&mut rng);

        let image1 = KeyImage::from(&private1);
        let image2 = KeyImage::from(&private2);

        assert_ne!(image1, image2);
    }

    #[test]
    fn test_key_image_from_u64() {
        let image1 = KeyImage::from(1u64);
        let image2 = KeyImage::from(2u64);
        let image1_again = KeyImage::from(1u64);

        assert_ne!(image1, image2);
        assert_eq!(image1, image1_again);
    }

    #[test]
    fn test_key_image_bytes_roundtrip() {
        let mut rng = rand_core::OsRng;
        let private = RistrettoPrivate::from_random(&mut rng);
        let key_image = KeyImage::from(&private);

        let bytes: [u8; 32] = *key_image.as_bytes();
        let recovered = KeyImage::try_from(bytes).expect("Should recover key image");

        assert_eq!(key_image, recovered);
    }

    #[test]
    fn test_key_image_invalid_length() {
        let short_bytes = [0u8; 16];
        let result = KeyImage::try_from(&short_bytes[..]);
        assert!(result.is_err());
    }

    #[test]
    fn test_key_image_ordering() {
        let image1 = KeyImage::from(1u64);
        let image2 = KeyImage::from(2u64);

        assert!(image1 != image2);
        assert!(image1 < image2 || image2 < image1);
    }
}
