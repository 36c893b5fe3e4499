// Copyright (c) 2025 The Vela Foundation

//! The full ring-confidential signature carried by a transaction.

use crate::{
    constants::{FEE_BLINDING, MAX_INPUTS, MAX_OUTPUTS},
    domain_separators::EXTENDED_MESSAGE_DOMAIN_TAG,
    range_proofs::{check_range_proofs, generate_range_proofs},
    ring_ct::Error,
};
use bulletproofs_og::RangeProof;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use vela_crypto_hashes::{Blake2b256, Digest};
use vela_crypto_keys::RistrettoPrivate;
use vela_crypto_ring_signature::{
    generators, Commitment, CompressedCommitment, KeyImage, ReducedTxOut, RingMLSAG, Scalar,
};
use zeroize::Zeroize;

/// A ring of outputs one of which is being spent, and the secrets needed to
/// spend it.
#[derive(Clone)]
pub struct SignableInputRing {
    /// The members of the ring, in the order they appear in the transaction.
    pub members: Vec<ReducedTxOut>,

    /// The index in `members` of the output actually being spent.
    pub real_input_index: usize,

    /// The one-time private key of the real input.
    pub onetime_private_key: RistrettoPrivate,

    /// The value of the real input.
    pub value: u64,

    /// The blinding of the real input's commitment.
    pub blinding: Scalar,
}

/// The secrets of an output being created: its value and commitment blinding.
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct OutputSecret {
    /// The value of the output.
    pub value: u64,

    /// The blinding of the output's commitment.
    pub blinding: Scalar,
}

/// A ring-confidential signature over a transaction prefix.
///
/// The signature demonstrates, without revealing which ring member is real,
/// that the signer owns one member of each input ring, that every amount is
/// in range, and that inputs equal outputs plus the declared fee.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SignatureRctFull {
    /// One ring signature per input, in the order of the inputs.
    pub ring_signatures: Vec<RingMLSAG>,

    /// One pseudo-output commitment per input. The i^th pseudo-output
    /// commits to the value of the i^th real input under a fresh blinding.
    pub pseudo_output_commitments: Vec<CompressedCommitment>,

    /// The serialized aggregated range proof over all output and
    /// pseudo-output commitments.
    pub range_proof_bytes: Vec<u8>,
}

impl SignatureRctFull {
    /// Sign rings of inputs, producing a signature binding them to the given
    /// outputs and fee.
    ///
    /// # Arguments
    /// * `message` - The digest of the transaction prefix being signed.
    /// * `rings` - One signable ring per input.
    /// * `output_secrets` - The value and blinding of each output created.
    /// * `fee` - The declared fee, in the clear.
    /// * `rng` - Randomness.
    pub fn sign<CSPRNG: RngCore + CryptoRng>(
        message: &[u8; 32],
        rings: &[SignableInputRing],
        output_secrets: &[OutputSecret],
        fee: u64,
        rng: &mut CSPRNG,
    ) -> Result<Self, Error> {
        if rings.is_empty() {
            return Err(Error::NoInputs);
        }
        if rings.len() > MAX_INPUTS as usize {
            return Err(Error::TooManyInputs(rings.len(), MAX_INPUTS as usize));
        }
        if output_secrets.is_empty() {
            return Err(Error::NoOutputs);
        }
        if output_secrets.len() > MAX_OUTPUTS as usize {
            return Err(Error::TooManyOutputs(
                output_secrets.len(),
                MAX_OUTPUTS as usize,
            ));
        }

        // The signature cannot balance unless input value equals output
        // value plus fee, so catch the mismatch before doing any work.
        let input_value: u128 = rings.iter().map(|ring| ring.value as u128).sum();
        let output_value: u128 = output_secrets
            .iter()
            .map(|secret| secret.value as u128)
            .sum();
        if input_value != output_value + fee as u128 {
            return Err(Error::ValueNotConserved);
        }

        let generator = generators();

        // Pseudo-output blindings. The last is chosen so that the sum of
        // pseudo-output blindings equals the sum of output blindings, which
        // makes the commitments balance (the fee commitment has a zero
        // blinding).
        let mut pseudo_output_blindings: Vec<Scalar> = (0..rings.len() - 1)
            .map(|_| Scalar::random(rng))
            .collect();
        let sum_of_output_blindings: Scalar = output_secrets
            .iter()
            .map(|secret| secret.blinding)
            .sum();
        let sum_of_pseudo_output_blindings: Scalar = pseudo_output_blindings.iter().sum();
        pseudo_output_blindings.push(sum_of_output_blindings - sum_of_pseudo_output_blindings);

        let pseudo_output_commitments: Vec<CompressedCommitment> = rings
            .iter()
            .zip(pseudo_output_blindings.iter())
            .map(|(ring, blinding)| CompressedCommitment::new(ring.value, *blinding, &generator))
            .collect();

        // A single aggregated range proof covers the outputs and the
        // pseudo-outputs.
        let mut values: Vec<u64> = output_secrets.iter().map(|secret| secret.value).collect();
        values.extend(rings.iter().map(|ring| ring.value));

        let mut blindings: Vec<Scalar> = output_secrets
            .iter()
            .map(|secret| secret.blinding)
            .collect();
        blindings.extend(pseudo_output_blindings.iter());

        let (range_proof, _commitments) =
            generate_range_proofs(&values, &blindings, &generator, rng)?;
        let range_proof_bytes = range_proof.to_bytes();

        // Each MLSAG signs the extended message, which commits to the prefix
        // digest, the pseudo-outputs and the range proof.
        let extended_message = extended_message_digest(
            message,
            &pseudo_output_commitments,
            &range_proof_bytes,
        );

        let ring_signatures: Vec<RingMLSAG> = rings
            .iter()
            .zip(pseudo_output_blindings.iter())
            .map(|(ring, pseudo_output_blinding)| {
                RingMLSAG::sign(
                    &extended_message,
                    &ring.members,
                    ring.real_input_index,
                    &ring.onetime_private_key,
                    ring.value,
                    &ring.blinding,
                    pseudo_output_blinding,
                    &generator,
                    rng,
                )
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            ring_signatures,
            pseudo_output_commitments,
            range_proof_bytes,
        })
    }

    /// Verify this signature over `message` against the given rings, output
    /// commitments and fee.
    ///
    /// Checks run in order: structure, balance, range, then each ring
    /// signature.
    pub fn verify<CSPRNG: RngCore + CryptoRng>(
        &self,
        message: &[u8; 32],
        rings: &[Vec<ReducedTxOut>],
        output_commitments: &[CompressedCommitment],
        fee: u64,
        rng: &mut CSPRNG,
    ) -> Result<(), Error> {
        // Structure.
        if rings.is_empty() {
            return Err(Error::NoInputs);
        }
        if rings.len() > MAX_INPUTS as usize {
            return Err(Error::TooManyInputs(rings.len(), MAX_INPUTS as usize));
        }
        if output_commitments.is_empty() {
            return Err(Error::NoOutputs);
        }
        if output_commitments.len() > MAX_OUTPUTS as usize {
            return Err(Error::TooManyOutputs(
                output_commitments.len(),
                MAX_OUTPUTS as usize,
            ));
        }
        if self.ring_signatures.len() != rings.len() {
            return Err(Error::LengthMismatch(
                self.ring_signatures.len(),
                rings.len(),
            ));
        }
        if self.pseudo_output_commitments.len() != rings.len() {
            return Err(Error::LengthMismatch(
                self.pseudo_output_commitments.len(),
                rings.len(),
            ));
        }

        let generator = generators();

        // Balance: the pseudo-outputs must equal the outputs plus the fee.
        let sum_of_pseudo_output_commitments: RistrettoPoint = self
            .pseudo_output_commitments
            .iter()
            .map(Commitment::try_from)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|commitment| commitment.point)
            .sum();

        let sum_of_output_commitments: RistrettoPoint = output_commitments
            .iter()
            .map(Commitment::try_from)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|commitment| commitment.point)
            .sum();

        let fee_commitment = generator.commit(Scalar::from(fee), FEE_BLINDING);

        if sum_of_pseudo_output_commitments != sum_of_output_commitments + fee_commitment {
            return Err(Error::ValueNotConserved);
        }

        // Range: every output and pseudo-output commits to a value in
        // [0, 2^64).
        let range_proof = RangeProof::from_bytes(&self.range_proof_bytes)
            .map_err(|_e| Error::MalformedRangeProof)?;

        let mut commitments: Vec<CompressedRistretto> = output_commitments
            .iter()
            .map(|commitment| commitment.point)
            .collect();
        commitments.extend(
            self.pseudo_output_commitments
                .iter()
                .map(|commitment| commitment.point),
        );

        check_range_proofs(&range_proof, &commitments, &generator, rng)?;

        // Ring signatures.
        let extended_message = extended_message_digest(
            message,
            &self.pseudo_output_commitments,
            &self.range_proof_bytes,
        );

        for ((ring_signature, ring), pseudo_output_commitment) in self
            .ring_signatures
            .iter()
            .zip(rings.iter())
            .zip(self.pseudo_output_commitments.iter())
        {
            ring_signature.verify(&extended_message, ring, pseudo_output_commitment)?;
        }

        Ok(())
    }

    /// The key images spent by this signature, in input order.
    pub fn key_images(&self) -> Vec<KeyImage> {
        self.ring_signatures
            .iter()
            .map(|ring_signature| ring_signature.key_image)
            .collect()
    }
}

/// The digest each MLSAG signs: the prefix digest extended with the
/// pseudo-output commitments and range proof, so none of them can be swapped
/// after signing.
fn extended_message_digest(
    message: &[u8; 32],
    pseudo_output_commitments: &[CompressedCommitment],
    range_proof_bytes: &[u8],
) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(EXTENDED_MESSAGE_DOMAIN_TAG);
    hasher.update(message);
    for commitment in pseudo_output_commitments {
        hasher.update(commitment.as_bytes());
    }
    hasher.update(range_proof_bytes);
    hasher.finalize().into()
}

#[cfg(test)]
mod rct_full_tests {
    use super::*;
    use vela_crypto_keys::{CompressedRistrettoPublic, RistrettoPublic};
    use vela_util_from_random::FromRandom;
    use vela_util_test_helper::{run_with_several_seeds, CryptoRng, RngCore};

    const RING_SIZE: usize = 4;

    struct SignatureParams {
        message: [u8; 32],
        rings: Vec<SignableInputRing>,
        output_secrets: Vec<OutputSecret>,
        fee: u64,
    }

    impl SignatureParams {
        // `num_inputs` inputs of value 100 each, `num_outputs` outputs
        // splitting the remainder after `fee`.
        fn random<RNG: RngCore + CryptoRng>(
            num_inputs: usize,
            num_outputs: usize,
            fee: u64,
            rng: &mut RNG,
        ) -> Self {
            let generator = generators();

            let mut message = [0u8; 32];
            rng.fill_bytes(&mut message);

            let input_value = 100u64;
            let mut rings = Vec::new();
            for _ in 0..num_inputs {
                let mut members: Vec<ReducedTxOut> = (0..RING_SIZE - 1)
                    .map(|_| ReducedTxOut {
                        public_key: CompressedRistrettoPublic::from_random(rng),
                        target_key: CompressedRistrettoPublic::from_random(rng),
                        commitment: CompressedCommitment::new(
                            rng.next_u64(),
                            Scalar::random(rng),
                            &generator,
                        ),
                    })
                    .collect();

                let onetime_private_key = RistrettoPrivate::from_random(rng);
                let blinding = Scalar::random(rng);
                let real_input_index = (rng.next_u64() as usize) % RING_SIZE;
                members.insert(
                    real_input_index,
                    ReducedTxOut {
                        public_key: CompressedRistrettoPublic::from_random(rng),
                        target_key: CompressedRistrettoPublic::from(RistrettoPublic::from(
                            &onetime_private_key,
                        )),
                        commitment: CompressedCommitment::new(input_value, blinding, &generator),
                    },
                );

                rings.push(SignableInputRing {
                    members,
                    real_input_index,
                    onetime_private_key,
                    value: input_value,
                    blinding,
                });
            }

            let total = input_value * num_inputs as u64 - fee;
            let each = total / num_outputs as u64;
            let mut output_secrets: Vec<OutputSecret> = (0..num_outputs - 1)
                .map(|_| OutputSecret {
                    value: each,
                    blinding: Scalar::random(rng),
                })
                .collect();
            output_secrets.push(OutputSecret {
                value: total - each * (num_outputs as u64 - 1),
                blinding: Scalar::random(rng),
            });

            Self {
                message,
                rings,
                output_secrets,
                fee,
            }
        }

        fn sign<RNG: RngCore + CryptoRng>(
            &self,
            rng: &mut RNG,
        ) -> Result<SignatureRctFull, Error> {
            SignatureRctFull::sign(&self.message, &self.rings, &self.output_secrets, self.fee, rng)
        }

        fn reduced_rings(&self) -> Vec<Vec<ReducedTxOut>> {
            self.rings.iter().map(|ring| ring.members.clone()).collect()
        }

        fn output_commitments(&self) -> Vec<CompressedCommitment> {
            let generator = generators();
            self.output_secrets
                .iter()
                .map(|secret| CompressedCommitment::new(secret.value, secret.blinding, &generator))
                .collect()
        }
    }

    #[test]
    fn sign_and_verify() {
        run_with_several_seeds(|mut rng| {
            let params = SignatureParams::random(2, 3, 10, &mut rng);
            let signature = params.sign(&mut rng).unwrap();

            signature
                .verify(
                    &params.message,
                    &params.reduced_rings(),
                    &params.output_commitments(),
                    params.fee,
                    &mut rng,
                )
                .unwrap();
        });
    }

    #[test]
    fn verify_rejects_wrong_fee() {
        run_with_several_seeds(|mut rng| {
            let params = SignatureParams::random(2, 2, 10, &mut rng);
            let signature = params.sign(&mut rng).unwrap();

            let result = signature.verify(
                &params.message,
                &params.reduced_rings(),
                &params.output_commitments(),
                params.fee + 1,
                &mut rng,
            );
            assert_eq!(result, Err(Error::ValueNotConserved));
        });
    }

    #[test]
    fn verify_rejects_wrong_message() {
        run_with_several_seeds(|mut rng| {
            let params = SignatureParams::random(1, 2, 10, &mut rng);
            let signature = params.sign(&mut rng).unwrap();

            let mut wrong_message = [0u8; 32];
            rng.fill_bytes(&mut wrong_message);

            let result = signature.verify(
                &wrong_message,
                &params.reduced_rings(),
                &params.output_commitments(),
                params.fee,
                &mut rng,
            );
            assert!(matches!(result, Err(Error::RingSignature(_))));
        });
    }

    #[test]
    fn verify_rejects_tampered_range_proof() {
        run_with_several_seeds(|mut rng| {
            let params = SignatureParams::random(1, 2, 10, &mut rng);
            let mut signature = params.sign(&mut rng).unwrap();

            // Flip one bit in the serialized proof.
            let last = signature.range_proof_bytes.len() - 1;
            signature.range_proof_bytes[last] ^= 1;

            let result = signature.verify(
                &params.message,
                &params.reduced_rings(),
                &params.output_commitments(),
                params.fee,
                &mut rng,
            );
            assert!(result.is_err());
        });
    }

    #[test]
    fn sign_rejects_unbalanced_values() {
        run_with_several_seeds(|mut rng| {
            let mut params = SignatureParams::random(1, 2, 10, &mut rng);
            params.output_secrets[0].value += 1;

            assert_eq!(params.sign(&mut rng), Err(Error::ValueNotConserved));
        });
    }

    #[test]
    fn sign_rejects_empty_rings() {
        run_with_several_seeds(|mut rng| {
            let params = SignatureParams::random(1, 1, 0, &mut rng);
            let result =
                SignatureRctFull::sign(&params.message, &[], &params.output_secrets, 0, &mut rng);
            assert_eq!(result, Err(Error::NoInputs));
        });
    }

    #[test]
    fn key_images_match_inputs() {
        run_with_several_seeds(|mut rng| {
            let params = SignatureParams::random(3, 2, 10, &mut rng);
            let signature = params.sign(&mut rng).unwrap();

            let expected: Vec<KeyImage> = params
                .rings
                .iter()
                .map(|ring| KeyImage::from(&ring.onetime_private_key))
                .collect();
            assert_eq!(signature.key_images(), expected);
        });
    }
}
