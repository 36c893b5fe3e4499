// Copyright (c) 2025 The Vela Foundation

//! Definition of a Vela transaction.

use crate::{
    domain_separators::TX_HASH_DOMAIN_TAG, ring_ct::SignatureRctFull, MaskedAmount, NewTxError,
};
use core::fmt;
use hex_fmt::HexFmt;
use serde::{Deserialize, Serialize};
use vela_account_keys::{PublicAddress, ScopedViewKey};
use vela_crypto_hashes::{Blake2b256, Digest};
use vela_crypto_keys::{CompressedRistrettoPublic, RistrettoPrivate, RistrettoPublic};
use vela_crypto_ring_signature::{
    onetime_keys::{create_onetime_public_key, create_shared_secret, create_tx_public_key},
    CompressedCommitment, KeyImage, ReducedTxOut,
};

/// The hash of a transaction.
#[derive(
    Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    /// The bytes of the hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for TxHash {
    fn from(src: [u8; 32]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for TxHash {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tx#{}", HexFmt(&self.0))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HexFmt(&self.0[0..6]))
    }
}

/// A Vela transaction: the signed prefix.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tx {
    /// The transaction contents.
    pub prefix: TxPrefix,

    /// The signature over the prefix.
    pub signature: SignatureRctFull,
}

impl Tx {
    /// The hash identifying this transaction.
    pub fn tx_hash(&self) -> TxHash {
        TxHash(hash_bytes_of(self))
    }

    /// The key images spent by this transaction, in input order.
    pub fn key_images(&self) -> Vec<KeyImage> {
        self.signature.key_images()
    }

    /// The public key of each output.
    pub fn output_public_keys(&self) -> Vec<CompressedRistrettoPublic> {
        self.prefix
            .outputs
            .iter()
            .map(|tx_out| tx_out.public_key)
            .collect()
    }
}

impl fmt::Display for Tx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tx_hash())
    }
}

/// The part of a transaction covered by the signature: inputs, outputs, fee
/// and expiry.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxPrefix {
    /// Transaction inputs.
    pub inputs: Vec<TxIn>,

    /// Transaction outputs.
    pub outputs: Vec<TxOut>,

    /// Fee paid to the block producer, in the clear.
    pub fee: u64,

    /// The block index at which this transaction is no longer valid.
    pub tombstone_block: u64,
}

impl TxPrefix {
    /// The digest of this prefix, signed by the transaction signature.
    pub fn hash(&self) -> TxHash {
        TxHash(hash_bytes_of(self))
    }

    /// Each input's ring in reduced form, ready for signature verification.
    pub fn get_input_rings(&self) -> Vec<Vec<ReducedTxOut>> {
        self.inputs
            .iter()
            .map(|tx_in| tx_in.ring.iter().map(ReducedTxOut::from).collect())
            .collect()
    }

    /// The commitment of each output.
    pub fn output_commitments(&self) -> Vec<CompressedCommitment> {
        self.outputs
            .iter()
            .map(|tx_out| tx_out.masked_amount.commitment)
            .collect()
    }
}

/// An input to a transaction: a ring of possibly-spent outputs.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxIn {
    /// A ring of outputs, one of which is the one really being spent.
    pub ring: Vec<TxOut>,
}

/// An output of a transaction.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TxOut {
    /// The amount commitment and masked value.
    pub masked_amount: MaskedAmount,

    /// The one-time public key this output is spendable by.
    pub target_key: CompressedRistrettoPublic,

    /// The per-output transaction public key `R = r * G`.
    pub public_key: CompressedRistrettoPublic,
}

impl TxOut {
    /// Create an output of `value` addressed to `recipient`.
    ///
    /// # Arguments
    /// * `value` - The value of the output.
    /// * `recipient` - The recipient's public address.
    /// * `tx_private_key` - A fresh transaction private key `r`, never
    ///   reused across outputs.
    pub fn new(
        value: u64,
        recipient: &PublicAddress,
        tx_private_key: &RistrettoPrivate,
    ) -> Result<Self, NewTxError> {
        let target_key =
            create_onetime_public_key(
                tx_private_key,
                recipient.view_public_key(),
                recipient.spend_public_key(),
            );
        let public_key = create_tx_public_key(tx_private_key);

        let shared_secret = create_shared_secret(recipient.view_public_key(), tx_private_key);
        let masked_amount = MaskedAmount::new(value, &shared_secret);

        Ok(Self {
            masked_amount,
            target_key: CompressedRistrettoPublic::from(&target_key),
            public_key: CompressedRistrettoPublic::from(&public_key),
        })
    }

    /// Recover this output's value with the recipient's view private key.
    pub fn view_key_value(
        &self,
        view_private_key: &RistrettoPrivate,
    ) -> Result<u64, NewTxError> {
        let tx_public_key = RistrettoPublic::try_from(&self.public_key)?;
        let shared_secret = create_shared_secret(&tx_public_key, view_private_key);
        let (value, _blinding) = self.masked_amount.get_value(&shared_secret)?;
        Ok(value)
    }
}

/// Recover an output's value and shared secret with a scoped view key.
///
/// `block_index` is the index of the block the output appeared in. Fails
/// unless the key matches the output and the block is inside the key's
/// validity window.
pub fn decrypt_with_scoped_view_key(
    key: &ScopedViewKey,
    tx_out: &TxOut,
    block_index: u64,
) -> Result<(u64, RistrettoPublic), NewTxError> {
    let target_key = RistrettoPublic::try_from(&tx_out.target_key)?;
    let tx_public_key = RistrettoPublic::try_from(&tx_out.public_key)?;
    if !key.matches_output(&target_key, &tx_public_key, block_index) {
        return Err(NewTxError::ViewKeyMismatch);
    }

    let shared_secret = create_shared_secret(&tx_public_key, key.view_private_key());
    let (value, _blinding) = tx_out.masked_amount.get_value(&shared_secret)?;
    Ok((value, shared_secret))
}

impl From<&TxOut> for ReducedTxOut {
    fn from(src: &TxOut) -> Self {
        Self {
            public_key: src.public_key,
            target_key: src.target_key,
            commitment: src.masked_amount.commitment,
        }
    }
}

// The canonical encoding of in-memory wire types cannot fail.
fn hash_bytes_of<T: serde::Serialize>(value: &T) -> [u8; 32] {
    let bytes = vela_util_serial::encode(value)
        .expect("canonical encoding of a wire type is infallible");
    let mut hasher = Blake2b256::new();
    hasher.update(TX_HASH_DOMAIN_TAG);
    hasher.update(&bytes);
    hasher.finalize().into()
}
