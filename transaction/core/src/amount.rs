// Copyright (c) 2025 The Vela Foundation

//! A masked amount: the on-chain form of an output's value.
//!
//! The value is committed to with a Pedersen commitment whose blinding is
//! derived from the sender-recipient shared secret, and additionally XOR
//! masked so the recipient can recover it without a brute-force search.

use crate::domain_separators::{AMOUNT_BLINDING_DOMAIN_TAG, AMOUNT_VALUE_DOMAIN_TAG};
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use vela_crypto_hashes::{Blake2b512, Digest};
use vela_crypto_keys::RistrettoPublic;
use vela_crypto_ring_signature::{generators, CompressedCommitment, Scalar};

/// An error which can occur when handling a masked amount.
#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum AmountError {
    /**
     * The masked value is not consistent with the commitment under the
     * given shared secret.
     */
    InconsistentCommitment,
}

/// A commitment to an output's value, and the value masked for the recipient.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MaskedAmount {
    /// The Pedersen commitment `v*B + b*B_blinding`.
    pub commitment: CompressedCommitment,

    /// `value XOR_8 Blake2b("vela_amount_value" | shared_secret)`.
    pub masked_value: u64,
}

impl MaskedAmount {
    /// Commit to `value` under the given sender-recipient shared secret.
    pub fn new(value: u64, shared_secret: &RistrettoPublic) -> Self {
        let blinding = get_blinding(shared_secret);
        let commitment = CompressedCommitment::new(value, blinding, &generators());
        let masked_value = value ^ get_value_mask(shared_secret);
        Self {
            commitment,
            masked_value,
        }
    }

    /// Recover the value and blinding factor, if the shared secret is right.
    ///
    /// Returns `InconsistentCommitment` when the commitment does not match
    /// the recomputed one, which happens when the shared secret belongs to a
    /// different output or the amount was tampered with.
    pub fn get_value(&self, shared_secret: &RistrettoPublic) -> Result<(u64, Scalar), AmountError> {
        let value = self.masked_value ^ get_value_mask(shared_secret);
        let blinding = get_blinding(shared_secret);

        let expected = CompressedCommitment::new(value, blinding, &generators());
        if self.commitment != expected {
            return Err(AmountError::InconsistentCommitment);
        }

        Ok((value, blinding))
    }
}

/// The blinding factor `Hs("vela_amount_blinding" | shared_secret)`.
fn get_blinding(shared_secret: &RistrettoPublic) -> Scalar {
    let mut hasher = Blake2b512::new();
    hasher.update(AMOUNT_BLINDING_DOMAIN_TAG);
    hasher.update(shared_secret.to_bytes());
    Scalar::from_hash(hasher)
}

/// The first eight bytes of `Blake2b("vela_amount_value" | shared_secret)`.
fn get_value_mask(shared_secret: &RistrettoPublic) -> u64 {
    let mut hasher = Blake2b512::new();
    hasher.update(AMOUNT_VALUE_DOMAIN_TAG);
    hasher.update(shared_secret.to_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes)
}
