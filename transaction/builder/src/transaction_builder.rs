// Copyright (c) 2025 The Vela Foundation

//! Utility for building and signing a transaction.

use crate::{InputCredentials, TxBuilderError};
use rand_core::{CryptoRng, RngCore};
use vela_account_keys::PublicAddress;
use vela_crypto_keys::RistrettoPrivate;
use vela_crypto_ring_signature::onetime_keys::create_shared_secret;
use vela_transaction_core::{
    ring_ct::{OutputSecret, SignableInputRing, SignatureRctFull},
    tx::{Tx, TxIn, TxOut, TxPrefix},
};
use vela_util_from_random::FromRandom;

/// Helper utility for building and signing a ring-confidential transaction.
pub struct TransactionBuilder {
    /// The inputs to spend.
    input_credentials: Vec<InputCredentials>,

    /// The outputs created so far, with their secrets.
    outputs_and_secrets: Vec<(TxOut, OutputSecret)>,

    /// The fee paid in connection with this transaction.
    fee: u64,

    /// The block index at which this transaction expires.
    tombstone_block: u64,
}

impl TransactionBuilder {
    /// Initializes a new TransactionBuilder with the given fee.
    pub fn new(fee: u64) -> Self {
        Self {
            input_credentials: Vec::new(),
            outputs_and_secrets: Vec::new(),
            fee,
            tombstone_block: u64::MAX,
        }
    }

    /// Add an input to the transaction.
    pub fn add_input(&mut self, input_credentials: InputCredentials) {
        self.input_credentials.push(input_credentials);
    }

    /// Add an output of `value` addressed to `recipient`.
    ///
    /// Returns the created output, from which the caller can build a receipt.
    pub fn add_output<RNG: CryptoRng + RngCore>(
        &mut self,
        value: u64,
        recipient: &PublicAddress,
        rng: &mut RNG,
    ) -> Result<TxOut, TxBuilderError> {
        let tx_private_key = RistrettoPrivate::from_random(rng);
        let tx_out = TxOut::new(value, recipient, &tx_private_key)?;

        let shared_secret = create_shared_secret(recipient.view_public_key(), &tx_private_key);
        let (_value, blinding) = tx_out.masked_amount.get_value(&shared_secret)?;

        self.outputs_and_secrets
            .push((tx_out.clone(), OutputSecret { value, blinding }));

        Ok(tx_out)
    }

    /// Sets the tombstone block, a block index in which the transaction
    /// expires and can no longer be added to the chain.
    pub fn set_tombstone_block(&mut self, tombstone_block: u64) {
        self.tombstone_block = tombstone_block;
    }

    /// Consume the builder and build the signed transaction.
    ///
    /// Inputs and outputs are put into the canonical order required by
    /// validation: outputs by public key, inputs by the public key of their
    /// first ring element.
    pub fn build<RNG: CryptoRng + RngCore>(mut self, rng: &mut RNG) -> Result<Tx, TxBuilderError> {
        if self.input_credentials.is_empty() {
            return Err(TxBuilderError::NoInputs);
        }
        if self.outputs_and_secrets.is_empty() {
            return Err(TxBuilderError::NoOutputs);
        }

        // Rings were sorted when the credentials were created, so the first
        // element is a stable sort key for the input.
        self.input_credentials
            .sort_by(|a, b| a.ring[0].public_key.cmp(&b.ring[0].public_key));

        self.outputs_and_secrets
            .sort_by(|a, b| a.0.public_key.cmp(&b.0.public_key));

        let signable_rings: Vec<SignableInputRing> = self
            .input_credentials
            .iter()
            .map(SignableInputRing::from)
            .collect();

        let inputs: Vec<TxIn> = self.input_credentials.iter().map(TxIn::from).collect();

        let (outputs, output_secrets): (Vec<TxOut>, Vec<OutputSecret>) =
            self.outputs_and_secrets.into_iter().unzip();

        let prefix = TxPrefix {
            inputs,
            outputs,
            fee: self.fee,
            tombstone_block: self.tombstone_block,
        };

        let signature = SignatureRctFull::sign(
            prefix.hash().as_bytes(),
            &signable_rings,
            &output_secrets,
            self.fee,
            rng,
        )?;

        Ok(Tx { prefix, signature })
    }
}
