// Copyright (c) 2025 The Vela Foundation

use crate::TxBuilderError;
use vela_crypto_keys::{RistrettoPrivate, RistrettoPublic};
use vela_crypto_ring_signature::{onetime_keys::create_shared_secret, ReducedTxOut, Scalar};
use vela_transaction_core::{
    ring_ct::SignableInputRing,
    tx::{TxIn, TxOut},
};
use zeroize::Zeroize;

/// Credentials required to construct a ring signature for an input.
#[derive(Clone)]
pub struct InputCredentials {
    /// A ring containing decoys and the one real `TxOut` to be spent.
    pub ring: Vec<TxOut>,

    /// Index in `ring` of the real output being spent.
    pub real_index: usize,

    /// The one-time private key of the real output.
    pub onetime_private_key: RistrettoPrivate,

    /// The value of the real output.
    pub value: u64,

    /// The blinding of the real output's commitment.
    pub blinding: Scalar,
}

impl Drop for InputCredentials {
    fn drop(&mut self) {
        self.onetime_private_key.zeroize();
        self.blinding.zeroize();
        self.value.zeroize();
    }
}

impl InputCredentials {
    /// Creates an InputCredentials instance used to create and sign an input.
    ///
    /// The ring is sorted by output public key here, so the ordering of
    /// decoys in the transaction does not depend on how the caller obtained
    /// them.
    ///
    /// # Arguments
    /// * `ring` - A ring of transaction outputs.
    /// * `real_index` - Index in `ring` of the output being spent.
    /// * `onetime_private_key` - The one-time private key of the real output.
    /// * `view_private_key` - The view private key belonging to the owner of
    ///   the real output, used to unmask its amount.
    pub fn new(
        ring: Vec<TxOut>,
        real_index: usize,
        onetime_private_key: RistrettoPrivate,
        view_private_key: &RistrettoPrivate,
    ) -> Result<Self, TxBuilderError> {
        if ring.is_empty() || real_index >= ring.len() {
            return Err(TxBuilderError::InvalidRingSize);
        }

        let real_input: TxOut = ring[real_index].clone();
        let real_output_public_key = RistrettoPublic::try_from(&real_input.public_key)?;

        let shared_secret = create_shared_secret(&real_output_public_key, view_private_key);

        let mut ring = ring;
        ring.sort_by(|a, b| a.public_key.cmp(&b.public_key));

        let real_index: usize = ring
            .iter()
            .position(|element| *element == real_input)
            .ok_or(TxBuilderError::InvalidRingSize)?;

        let (value, blinding) = ring[real_index].masked_amount.get_value(&shared_secret)?;

        Ok(InputCredentials {
            ring,
            real_index,
            onetime_private_key,
            value,
            blinding,
        })
    }
}

impl From<&InputCredentials> for SignableInputRing {
    fn from(src: &InputCredentials) -> Self {
        SignableInputRing {
            members: src.ring.iter().map(ReducedTxOut::from).collect(),
            real_input_index: src.real_index,
            onetime_private_key: src.onetime_private_key.clone(),
            value: src.value,
            blinding: src.blinding,
        }
    }
}

impl From<&InputCredentials> for TxIn {
    fn from(input_credentials: &InputCredentials) -> TxIn {
        TxIn {
            ring: input_credentials.ring.clone(),
        }
    }
}
