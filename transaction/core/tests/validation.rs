// Copyright (c) 2025 The Vela Foundation

//! End-to-end validation of complete transactions.

use assert_matches::assert_matches;
use vela_account_keys::AccountKey;
use vela_crypto_keys::{RistrettoPrivate, RistrettoPublic};
use vela_crypto_ring_signature::{
    onetime_keys::create_shared_secret, ReducedTxOut, Scalar,
};
use vela_transaction_core::{
    constants::{MAX_TX_SIZE, MINIMUM_FEE, RING_SIZE},
    ring_ct::{OutputSecret, SignableInputRing, SignatureRctFull},
    tx::{Tx, TxIn, TxOut, TxPrefix},
    validation::{validate, validate_transaction_size, TransactionValidationError},
};
use vela_util_from_random::FromRandom;
use vela_util_test_helper::{run_with_several_seeds, CryptoRng, RngCore};

const INPUT_VALUE: u64 = 100 * MINIMUM_FEE;
const CURRENT_BLOCK: u64 = 1000;

/// An output of known value addressed to `recipient`, with its secrets.
fn create_output<R: RngCore + CryptoRng>(
    value: u64,
    recipient: &AccountKey,
    rng: &mut R,
) -> (TxOut, OutputSecret) {
    let tx_private_key = RistrettoPrivate::from_random(rng);
    let tx_out = TxOut::new(value, &recipient.public_address(), &tx_private_key).unwrap();

    let shared_secret = create_shared_secret(
        recipient.public_address().view_public_key(),
        &tx_private_key,
    );
    let (_value, blinding) = tx_out.masked_amount.get_value(&shared_secret).unwrap();

    (tx_out, OutputSecret { value, blinding })
}

/// A transaction spending one ring-confidential input to two recipients.
fn create_test_tx<R: RngCore + CryptoRng>(rng: &mut R) -> Tx {
    let sender = AccountKey::from_random(rng);

    // The output being spent.
    let tx_private_key = RistrettoPrivate::from_random(rng);
    let real_tx_out =
        TxOut::new(INPUT_VALUE, &sender.public_address(), &tx_private_key).unwrap();

    // Decoys drawn from other people's outputs.
    let mut ring: Vec<TxOut> = (0..RING_SIZE - 1)
        .map(|_| {
            let decoy_account = AccountKey::from_random(rng);
            let decoy_private = RistrettoPrivate::from_random(rng);
            TxOut::new(rng.next_u64() >> 32, &decoy_account.public_address(), &decoy_private)
                .unwrap()
        })
        .collect();
    ring.push(real_tx_out.clone());
    ring.sort_by(|a, b| a.public_key.cmp(&b.public_key));
    let real_input_index = ring
        .iter()
        .position(|tx_out| *tx_out == real_tx_out)
        .unwrap();

    // Recover the spend secrets for the real input.
    let tx_public_key = RistrettoPublic::try_from(&real_tx_out.public_key).unwrap();
    let onetime_private_key = sender.recover_onetime_private_key(&tx_public_key);
    let shared_secret = create_shared_secret(&tx_public_key, sender.view_private_key());
    let (_value, blinding) = real_tx_out.masked_amount.get_value(&shared_secret).unwrap();

    let signable_ring = SignableInputRing {
        members: ring.iter().map(ReducedTxOut::from).collect(),
        real_input_index,
        onetime_private_key,
        value: INPUT_VALUE,
        blinding,
    };

    // Two outputs plus the fee consume the input exactly.
    let recipient = AccountKey::from_random(rng);
    let fee = MINIMUM_FEE;
    let change = INPUT_VALUE / 4;
    let payment = INPUT_VALUE - change - fee;

    let mut outputs_and_secrets = vec![
        create_output(payment, &recipient, rng),
        create_output(change, &sender, rng),
    ];
    outputs_and_secrets.sort_by(|a, b| a.0.public_key.cmp(&b.0.public_key));
    let (outputs, output_secrets): (Vec<TxOut>, Vec<OutputSecret>) =
        outputs_and_secrets.into_iter().unzip();

    let prefix = TxPrefix {
        inputs: vec![TxIn { ring }],
        outputs,
        fee,
        tombstone_block: CURRENT_BLOCK + 50,
    };

    let signature = SignatureRctFull::sign(
        prefix.hash().as_bytes(),
        &[signable_ring],
        &output_secrets,
        fee,
        rng,
    )
    .unwrap();

    Tx { prefix, signature }
}

#[test]
fn valid_transaction_is_accepted() {
    run_with_several_seeds(|mut rng| {
        let tx = create_test_tx(&mut rng);
        validate(&tx, CURRENT_BLOCK, MINIMUM_FEE, &mut rng).unwrap();
    });
}

#[test]
fn modified_fee_invalidates_signature() {
    run_with_several_seeds(|mut rng| {
        let mut tx = create_test_tx(&mut rng);
        tx.prefix.fee += 1;

        let result = validate(&tx, CURRENT_BLOCK, MINIMUM_FEE, &mut rng);
        assert_matches!(
            result,
            Err(TransactionValidationError::InvalidTransactionSignature(_))
        );
    });
}

#[test]
fn undersized_ring_is_rejected() {
    run_with_several_seeds(|mut rng| {
        let mut tx = create_test_tx(&mut rng);
        tx.prefix.inputs[0].ring.truncate(RING_SIZE - 1);

        assert_eq!(
            validate(&tx, CURRENT_BLOCK, MINIMUM_FEE, &mut rng),
            Err(TransactionValidationError::InsufficientRingSize)
        );
    });
}

#[test]
fn tampered_output_commitment_invalidates_signature() {
    run_with_several_seeds(|mut rng| {
        let mut tx = create_test_tx(&mut rng);
        tx.prefix.outputs[0].masked_amount =
            vela_transaction_core::MaskedAmount::new(
                u64::MAX,
                &RistrettoPublic::from(&RistrettoPrivate::from_random(&mut rng)),
            );

        let result = validate(&tx, CURRENT_BLOCK, MINIMUM_FEE, &mut rng);
        assert_matches!(
            result,
            Err(TransactionValidationError::InvalidTransactionSignature(_))
        );
    });
}

#[test]
fn insufficient_fee_is_rejected() {
    run_with_several_seeds(|mut rng| {
        let tx = create_test_tx(&mut rng);

        assert_eq!(
            validate(&tx, CURRENT_BLOCK, tx.prefix.fee + 1, &mut rng),
            Err(TransactionValidationError::TxFeeError)
        );
    });
}

#[test]
fn expired_tombstone_is_rejected() {
    run_with_several_seeds(|mut rng| {
        let tx = create_test_tx(&mut rng);

        assert_eq!(
            validate(&tx, tx.prefix.tombstone_block, MINIMUM_FEE, &mut rng),
            Err(TransactionValidationError::TombstoneBlockExceeded)
        );
    });
}

#[test]
fn unsorted_outputs_are_rejected() {
    run_with_several_seeds(|mut rng| {
        let mut tx = create_test_tx(&mut rng);
        tx.prefix.outputs.reverse();

        assert_eq!(
            validate(&tx, CURRENT_BLOCK, MINIMUM_FEE, &mut rng),
            Err(TransactionValidationError::UnsortedOutputs)
        );
    });
}

#[test]
fn duplicated_ring_element_is_rejected() {
    run_with_several_seeds(|mut rng| {
        let mut tx = create_test_tx(&mut rng);
        tx.prefix.inputs[0].ring[0] = tx.prefix.inputs[0].ring[1].clone();

        assert_eq!(
            validate(&tx, CURRENT_BLOCK, MINIMUM_FEE, &mut rng),
            Err(TransactionValidationError::DuplicateRingElements)
        );
    });
}

#[test]
fn oversized_transaction_is_rejected() {
    run_with_several_seeds(|mut rng| {
        let tx = create_test_tx(&mut rng);

        // A single-input transaction fits comfortably under the ceiling.
        validate_transaction_size(&tx, MAX_TX_SIZE).unwrap();

        assert_eq!(
            validate_transaction_size(&tx, 1024),
            Err(TransactionValidationError::TransactionTooLarge)
        );
    });
}

#[test]
fn tx_hash_changes_with_contents() {
    run_with_several_seeds(|mut rng| {
        let tx = create_test_tx(&mut rng);
        let mut modified = tx.clone();
        modified.prefix.tombstone_block += 1;

        assert_ne!(tx.tx_hash(), modified.tx_hash());
    });
}
