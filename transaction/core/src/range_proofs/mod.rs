// Copyright (c) 2025 The Vela Foundation

//! Aggregated Bulletproofs range proofs over amount commitments.
//!
//! A transaction carries a single proof that every output commitment, and
//! every pseudo-output commitment, commits to a value in `[0, 2^64)`. Without
//! this, a negative-valued output could mint coins while still balancing.

pub mod error;

use crate::domain_separators::RANGE_PROOF_DOMAIN_TAG;
use bulletproofs_og::{BulletproofGens, RangeProof};
use curve25519_dalek::ristretto::CompressedRistretto;
use error::Error;
use lazy_static::lazy_static;
use merlin::Transcript;
use rand_core::{CryptoRng, RngCore};
use vela_crypto_ring_signature::{PedersenGens, Scalar};

lazy_static! {
    /// Generators sufficient for aggregated 64-bit proofs over up to 64
    /// commitments, which is more than `MAX_OUTPUTS + MAX_INPUTS`.
    static ref BP_GENS: BulletproofGens = BulletproofGens::new(64, 64);
}

/// Create an aggregated 64-bit range proof for a set of values.
///
/// The aggregated proof requires the number of values to be a power of two,
/// so the values and blindings are padded by repeating the last element. The
/// commitments produced for the padding are discarded by callers.
///
/// # Arguments
/// * `values` - Values to prove in range. Must not be empty.
/// * `blindings` - Blinding factor per value, same length as `values`.
/// * `generator` - The Pedersen generators the commitments were made with.
/// * `rng` - Randomness.
pub fn generate_range_proofs<T: RngCore + CryptoRng>(
    values: &[u64],
    blindings: &[Scalar],
    generator: &PedersenGens,
    rng: &mut T,
) -> Result<(RangeProof, Vec<CompressedRistretto>), Error> {
    // Most of the time, the number of values being committed to wont be a
    // power of 2, in which case we pad the list by repeating the last value.
    let values_padded: Vec<u64> = resize_slice_to_pow2::<u64>(values)?;
    let blindings_padded: Vec<Scalar> = resize_slice_to_pow2::<Scalar>(blindings)?;

    RangeProof::prove_multiple_with_rng(
        &BP_GENS,
        &bp_pedersen_gens(generator),
        &mut Transcript::new(RANGE_PROOF_DOMAIN_TAG.as_bytes()),
        &values_padded,
        &blindings_padded,
        64,
        rng,
    )
    .map_err(Error::from)
}

/// Verify an aggregated 64-bit range proof over the given commitments.
///
/// The commitment list is padded to a power of two by repeating its last
/// element, matching the padding applied at proving time.
pub fn check_range_proofs<T: RngCore + CryptoRng>(
    range_proof: &RangeProof,
    commitments: &[CompressedRistretto],
    generator: &PedersenGens,
    rng: &mut T,
) -> Result<(), Error> {
    let commitments_padded = resize_slice_to_pow2::<CompressedRistretto>(commitments)?;

    range_proof
        .verify_multiple_with_rng(
            &BP_GENS,
            &bp_pedersen_gens(generator),
            &mut Transcript::new(RANGE_PROOF_DOMAIN_TAG.as_bytes()),
            &commitments_padded,
            64,
            rng,
        )
        .map_err(Error::from)
}

// The bulletproofs crate has its own generator struct; ours exists so that
// commitment code need not depend on bulletproofs.
fn bp_pedersen_gens(generator: &PedersenGens) -> bulletproofs_og::PedersenGens {
    bulletproofs_og::PedersenGens {
        B: generator.B,
        B_blinding: generator.B_blinding,
    }
}

/// Pad `slice` to the next power of two by repeating its last element.
fn resize_slice_to_pow2<T: Clone>(slice: &[T]) -> Result<Vec<T>, Error> {
    let len: usize = slice.len();
    if let Some(next_power_of_two) = len.checked_next_power_of_two() {
        let diff = next_power_of_two - len;
        let mut pow2_slice: Vec<T> = Vec::with_capacity(next_power_of_two);
        pow2_slice.extend_from_slice(slice);
        if let Some(last) = slice.last() {
            pow2_slice.extend(core::iter::repeat(last.clone()).take(diff));
            Ok(pow2_slice)
        } else {
            Err(Error::Resize)
        }
    } else {
        // The next power of two would exceed usize::MAX.
        Err(Error::Resize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_crypto_ring_signature::generators;
    use vela_util_test_helper::{get_seeded_rng, RngCore};

    fn generate_and_check(vals: Vec<u64>) {
        let mut rng = get_seeded_rng();
        let blindings: Vec<Scalar> = vals.iter().map(|_| Scalar::random(&mut rng)).collect();
        let gens = generators();
        let (proof, commitments) =
            generate_range_proofs(&vals, &blindings, &gens, &mut rng).unwrap();

        check_range_proofs(&proof, &commitments, &gens, &mut rng).unwrap();
    }

    #[test]
    fn test_pow2_number_of_inputs() {
        let mut rng = get_seeded_rng();
        let vals: Vec<u64> = (0..2).map(|_| rng.next_u64()).collect();
        generate_and_check(vals);
    }

    #[test]
    fn test_not_pow2_number_of_inputs() {
        let mut rng = get_seeded_rng();
        let vals: Vec<u64> = (0..9).map(|_| rng.next_u64()).collect();
        generate_and_check(vals);
    }

    #[test]
    fn test_single_value() {
        generate_and_check(vec![u64::MAX]);
    }

    #[test]
    fn test_wrong_commitment_fails() {
        let mut rng = get_seeded_rng();
        let gens = generators();

        let vals = vec![10u64, 20u64, 30u64];
        let blindings: Vec<Scalar> = vals.iter().map(|_| Scalar::random(&mut rng)).collect();
        let (proof, mut commitments) =
            generate_range_proofs(&vals, &blindings, &gens, &mut rng).unwrap();

        // Substitute a commitment to a different value.
        commitments[0] = gens.commit(Scalar::from(11u64), blindings[0]).compress();

        assert!(check_range_proofs(&proof, &commitments, &gens, &mut rng).is_err());
    }

    #[test]
    fn test_empty_values_fails() {
        let mut rng = get_seeded_rng();
        let gens = generators();
        assert!(generate_range_proofs(&[], &[], &gens, &mut rng).is_err());
    }
}
