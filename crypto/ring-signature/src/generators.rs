// Copyright (c) 2025 The Vela Foundation

//! Pedersen commitment generators.

use crate::domain_separators::VALUE_GENERATOR_DOMAIN_TAG;
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar,
};
use vela_crypto_hashes::{Blake2b512, Digest};

/// The blinding-factor generator: the Ristretto basepoint.
///
/// This is also the generator for one-time public keys, so MLSAG key
/// responses and commitment responses share it.
pub const B_BLINDING: RistrettoPoint = RISTRETTO_BASEPOINT_POINT;

/// A pair of generators for Pedersen commitments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PedersenGens {
    /// The generator the committed value multiplies.
    pub B: RistrettoPoint,

    /// The generator the blinding factor multiplies.
    pub B_blinding: RistrettoPoint,
}

impl PedersenGens {
    /// Commit: `value * B + blinding * B_blinding`.
    pub fn commit(&self, value: Scalar, blinding: Scalar) -> RistrettoPoint {
        value * self.B + blinding * self.B_blinding
    }
}

/// The generators used for all Vela amount commitments.
///
/// The value generator is a nothing-up-my-sleeve point obtained by hashing a
/// domain tag, so its discrete log with respect to the basepoint is unknown.
pub fn generators() -> PedersenGens {
    let mut hasher = Blake2b512::new();
    hasher.update(VALUE_GENERATOR_DOMAIN_TAG);
    PedersenGens {
        B: RistrettoPoint::from_hash(hasher),
        B_blinding: B_BLINDING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_generator_differs_from_blinding_generator() {
        let gens = generators();
        assert_ne!(gens.B, gens.B_blinding);
    }

    #[test]
    fn commitments_are_additively_homomorphic() {
        let gens = generators();
        let a = gens.commit(Scalar::from(3u64), Scalar::from(10u64));
        let b = gens.commit(Scalar::from(4u64), Scalar::from(20u64));
        let sum = gens.commit(Scalar::from(7u64), Scalar::from(30u64));
        assert_eq!(a + b, sum);
    }
}
