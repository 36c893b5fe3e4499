// Copyright (c) 2025 The Vela Foundation

//! Linkable ring signatures.

mod error;
mod key_image;
mod mlsag;

pub use error::Error;
pub use key_image::KeyImage;
pub use mlsag::RingMLSAG;

pub use crate::{CurveScalar, PedersenGens, B_BLINDING};
pub use curve25519_dalek::scalar::Scalar;

use crate::domain_separators::HASH_TO_POINT_DOMAIN_TAG;
use curve25519_dalek::ristretto::RistrettoPoint;
use vela_crypto_hashes::{Blake2b512, Digest};
use vela_crypto_keys::RistrettoPublic;

/// Map a public key onto the curve, with no known discrete log.
///
/// Key images are computed against this point, so the map must be fixed
/// forever: `I = x * hash_to_point(x * G)`.
pub fn hash_to_point(ristretto_public: &RistrettoPublic) -> RistrettoPoint {
    let mut hasher = Blake2b512::new();
    hasher.update(HASH_TO_POINT_DOMAIN_TAG);
    hasher.update(ristretto_public.to_bytes());
    RistrettoPoint::from_hash(hasher)
}
