// Copyright (c) 2025 The Vela Foundation

//! MLSAG ring signatures over one-time keys and amount commitments.

use alloc::{vec, vec::Vec};
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use vela_crypto_hashes::{Blake2b512, Digest};
use vela_crypto_keys::{CompressedRistrettoPublic, RistrettoPrivate, RistrettoPublic};
use zeroize::Zeroizing;

use crate::{
    commitment::{Commitment, CompressedCommitment},
    domain_separators::RING_MLSAG_CHALLENGE_DOMAIN_TAG,
    ring_signature::{hash_to_point, Error, KeyImage, Scalar},
    CurveScalar, PedersenGens, ReducedTxOut, B_BLINDING,
};

/// An MLSAG over a ring of one-time keys and their amount commitments.
///
/// Each ring member contributes two rows to the signature: one proving
/// knowledge of a one-time private key (and binding its key image), and one
/// proving that the signed input's true commitment differs from the
/// pseudo-output commitment only in the blinding.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RingMLSAG {
    /// The initial challenge `c[0]`.
    pub c_zero: CurveScalar,

    /// Responses `r_{0,0}, r_{0,1}, ..., r_{n-1,0}, r_{n-1,1}`.
    pub responses: Vec<CurveScalar>,

    /// Key image "spent" by this signature.
    pub key_image: KeyImage,
}

impl RingMLSAG {
    /// Sign a ring of input onetime addresses and amount commitments.
    ///
    /// # Arguments
    /// * `message` - Message to be signed.
    /// * `ring` - A ring of inputs. Aborts if `ring` is empty.
    /// * `real_index` - The index in the ring of the real input.
    /// * `onetime_private_key` - The real input's private key.
    /// * `value` - Value of the real input.
    /// * `blinding` - Blinding of the real input.
    /// * `pseudo_output_blinding` - Blinding for the pseudo-output commitment.
    /// * `generator` - Pedersen generator for the amount commitments.
    /// * `rng` - Randomness.
    pub fn sign<CSPRNG: RngCore + CryptoRng>(
        message: &[u8],
        ring: &[ReducedTxOut],
        real_index: usize,
        onetime_private_key: &RistrettoPrivate,
        value: u64,
        blinding: &Scalar,
        pseudo_output_blinding: &Scalar,
        generator: &PedersenGens,
        rng: &mut CSPRNG,
    ) -> Result<Self, Error> {
        Self::sign_with_balance_check(
            message,
            ring,
            real_index,
            onetime_private_key,
            value,
            blinding,
            pseudo_output_blinding,
            generator,
            true,
            rng,
        )
    }

    // If `check_value_is_preserved` is set, confirm that the value of the real
    // input equals the value of the pseudo-output before signing. A signature
    // made over unequal values would never verify against the pseudo-output,
    // so catching the mismatch here gives a better error.
    #[allow(clippy::too_many_arguments)]
    #[allow(non_snake_case)]
    fn sign_with_balance_check<CSPRNG: RngCore + CryptoRng>(
        message: &[u8],
        ring: &[ReducedTxOut],
        real_index: usize,
        onetime_private_key: &RistrettoPrivate,
        value: u64,
        blinding: &Scalar,
        pseudo_output_blinding: &Scalar,
        generator: &PedersenGens,
        check_value_is_preserved: bool,
        rng: &mut CSPRNG,
    ) -> Result<Self, Error> {
        let ring_size = ring.len();

        if real_index >= ring_size {
            return Err(Error::IndexOutOfBounds);
        }

        let G = RISTRETTO_BASEPOINT_POINT;
        let H = B_BLINDING;

        let key_image = KeyImage::from(onetime_private_key);

        // The uncompressed key_image.
        let I: RistrettoPoint = key_image
            .point
            .decompress()
            .ok_or(Error::InvalidKeyImage)?;

        // Uncompressed output commitment, one per ring member.
        let decompressed_commitments: Vec<Commitment> = ring
            .iter()
            .map(|txout| Commitment::try_from(&txout.commitment))
            .collect::<Result<_, _>>()?;

        // The pseudo-output commitment, to `value` under
        // `pseudo_output_blinding`.
        let pseudo_output = generator.commit(Scalar::from(value), *pseudo_output_blinding);

        if check_value_is_preserved {
            let real_commitment = decompressed_commitments[real_index].point;
            let difference = real_commitment - pseudo_output;
            if difference != (blinding - pseudo_output_blinding) * H {
                return Err(Error::ValueNotConserved);
            }
        }

        // Secret key for the second row: the difference of blindings.
        let z = Zeroizing::new(blinding - pseudo_output_blinding);

        // Challenges `c_0, ..., c_{ring_size - 1}`.
        let mut c: Vec<Scalar> = vec![Scalar::ZERO; ring_size];

        // Responses `r_{0,0}, r_{0,1}, ..., r_{n-1,0}, r_{n-1,1}`.
        let mut r: Vec<Scalar> = vec![Scalar::ZERO; 2 * ring_size];
        for (i, r_i) in r.iter_mut().enumerate() {
            if i / 2 != real_index {
                *r_i = Scalar::random(rng);
            }
        }

        let alpha_0 = Zeroizing::new(Scalar::random(rng));
        let alpha_1 = Zeroizing::new(Scalar::random(rng));

        for n in 0..ring_size {
            // Iterate around the ring, starting at real_index.
            let i = (real_index + n) % ring_size;
            let txout = &ring[i];

            let onetime_public_key = RistrettoPublic::try_from(&txout.target_key)?;

            let (L0, R0, L1) = if i == real_index {
                // c_{i+1} = Hn( m | key_image | alpha_0 * G | alpha_0 * Hp(P_i) | alpha_1 * G )
                //         = Hn( m | key_image |      L0     |         R0        |      L1     )
                let L0 = *alpha_0 * G;
                let R0 = *alpha_0 * hash_to_point(&onetime_public_key);
                let L1 = *alpha_1 * H;
                (L0, R0, L1)
            } else {
                // c_{i+1} = Hn( m | key_image | r_{i,0} * G + c_i * P_i |
                //              r_{i,0} * Hp(P_i) + c_i * I |
                //              r_{i,1} * H + c_i * Z_i )
                // where Z_i is the i^th "commitment to zero", the difference
                // of the i^th commitment and the pseudo-output commitment.
                let L0 = r[2 * i] * G + c[i] * onetime_public_key.as_ref();
                let R0 = r[2 * i] * hash_to_point(&onetime_public_key) + c[i] * I;
                let L1 =
                    r[2 * i + 1] * H + c[i] * (decompressed_commitments[i].point - pseudo_output);
                (L0, R0, L1)
            };

            c[(i + 1) % ring_size] = challenge(message, &key_image, &L0, &R0, &L1);
        }

        // "Close the ring" by computing the responses for the real index.
        r[2 * real_index] = *alpha_0 - c[real_index] * onetime_private_key.as_ref();
        r[2 * real_index + 1] = *alpha_1 - c[real_index] * *z;

        let responses: Vec<CurveScalar> = r.into_iter().map(CurveScalar::from).collect();

        Ok(Self {
            c_zero: CurveScalar::from(c[0]),
            responses,
            key_image,
        })
    }

    /// Verify this signature over `message` against `ring` and the
    /// pseudo-output commitment it claims to balance against.
    #[allow(non_snake_case)]
    pub fn verify(
        &self,
        message: &[u8],
        ring: &[ReducedTxOut],
        pseudo_output: &CompressedCommitment,
    ) -> Result<(), Error> {
        let ring_size = ring.len();
        // An empty ring proves nothing. Reject it before the challenge loop,
        // which would otherwise index into empty vectors.
        if ring_size == 0 {
            return Err(Error::InvalidSignature);
        }
        // `responses` must contain `2 * ring_size` elements.
        if self.responses.len() != 2 * ring_size {
            return Err(Error::LengthMismatch(2 * ring_size, self.responses.len()));
        }

        let G = RISTRETTO_BASEPOINT_POINT;
        let H = B_BLINDING;

        // The key image must decompress, otherwise the signature is invalid.
        let I: RistrettoPoint = self
            .key_image
            .point
            .decompress()
            .ok_or(Error::InvalidKeyImage)?;

        let r: Vec<Scalar> = self.responses.iter().map(|response| response.scalar).collect();

        let pseudo_output = Commitment::try_from(pseudo_output)?.point;

        // Recompute challenges.
        let mut recomputed_c = vec![Scalar::ZERO; ring_size];

        for (i, txout) in ring.iter().enumerate() {
            let c_i = if i == 0 {
                // Initialize loop with the signature's claimed c_0.
                self.c_zero.scalar
            } else {
                recomputed_c[i]
            };

            let onetime_public_key = RistrettoPublic::try_from(&txout.target_key)?;
            let commitment = Commitment::try_from(&txout.commitment)?;

            let L0 = r[2 * i] * G + c_i * onetime_public_key.as_ref();
            let R0 = r[2 * i] * hash_to_point(&onetime_public_key) + c_i * I;
            let L1 = r[2 * i + 1] * H + c_i * (commitment.point - pseudo_output);

            recomputed_c[(i + 1) % ring_size] = challenge(message, &self.key_image, &L0, &R0, &L1);
        }

        if self.c_zero.scalar == recomputed_c[0] {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

// Challenge `c_{i+1} = Hn( m | key_image | L0 | R0 | L1 )`.
#[allow(non_snake_case)]
fn challenge(
    message: &[u8],
    key_image: &KeyImage,
    L0: &RistrettoPoint,
    R0: &RistrettoPoint,
    L1: &RistrettoPoint,
) -> Scalar {
    let mut hasher = Blake2b512::new();
    hasher.update(RING_MLSAG_CHALLENGE_DOMAIN_TAG);
    hasher.update(message);
    hasher.update(key_image.as_bytes());
    hasher.update(L0.compress().as_bytes());
    hasher.update(R0.compress().as_bytes());
    hasher.update(L1.compress().as_bytes());
    Scalar::from_hash(hasher)
}
