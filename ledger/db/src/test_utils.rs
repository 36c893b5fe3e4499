// Copyright (c) 2025 The Vela Foundation

//! An in-memory [`Ledger`] for tests.

use crate::{Error, Ledger};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use vela_common::{HashMap, HashSet};
use vela_crypto_keys::CompressedRistrettoPublic;
use vela_transaction_core::{tx::TxOut, KeyImage};

#[derive(Default)]
struct MockLedgerInner {
    tx_outs: Vec<TxOut>,
    index_by_public_key: HashMap<CompressedRistrettoPublic, u64>,
    key_images: HashSet<KeyImage>,
}

/// An in-memory ledger with the same atomicity guarantees as [`crate::LedgerDB`].
#[derive(Default)]
pub struct MockLedger {
    inner: Mutex<MockLedgerInner>,
    failing: AtomicBool,
}

impl MockLedger {
    /// Creates an empty mock ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger with outputs, e.g. to serve as ring members.
    pub fn seed_tx_outs(&self, tx_outs: &[TxOut]) {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        for tx_out in tx_outs {
            let index = inner.tx_outs.len() as u64;
            inner.index_by_public_key.insert(tx_out.public_key, index);
            inner.tx_outs.push(tx_out.clone());
        }
    }

    /// Makes every subsequent ledger operation fail, simulating database
    /// corruption.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> Result<(), Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Lmdb(lmdb::Error::Corrupted));
        }
        Ok(())
    }
}

impl Ledger for MockLedger {
    fn contains_key_image(&self, key_image: &KeyImage) -> Result<bool, Error> {
        self.check_failing()?;
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(inner.key_images.contains(key_image))
    }

    fn contains_tx_out_public_key(
        &self,
        public_key: &CompressedRistrettoPublic,
    ) -> Result<bool, Error> {
        self.check_failing()?;
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(inner.index_by_public_key.contains_key(public_key))
    }

    fn get_tx_out_index_by_public_key(
        &self,
        public_key: &CompressedRistrettoPublic,
    ) -> Result<u64, Error> {
        self.check_failing()?;
        let inner = self.inner.lock().expect("mutex poisoned");
        inner
            .index_by_public_key
            .get(public_key)
            .copied()
            .ok_or(Error::NotFound)
    }

    fn get_tx_out_by_index(&self, index: u64) -> Result<TxOut, Error> {
        self.check_failing()?;
        let inner = self.inner.lock().expect("mutex poisoned");
        inner
            .tx_outs
            .get(index as usize)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn num_tx_outs(&self) -> Result<u64, Error> {
        self.check_failing()?;
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(inner.tx_outs.len() as u64)
    }

    fn num_key_images(&self) -> Result<u64, Error> {
        self.check_failing()?;
        let inner = self.inner.lock().expect("mutex poisoned");
        Ok(inner.key_images.len() as u64)
    }

    fn record_spends(&self, key_images: &[KeyImage], outputs: &[TxOut]) -> Result<(), Error> {
        self.check_failing()?;
        let mut inner = self.inner.lock().expect("mutex poisoned");

        // Validate the whole batch before mutating anything.
        for key_image in key_images {
            if inner.key_images.contains(key_image) {
                return Err(Error::KeyImageAlreadySpent);
            }
        }
        for tx_out in outputs {
            if inner.index_by_public_key.contains_key(&tx_out.public_key) {
                return Err(Error::DuplicateOutputPublicKey);
            }
        }

        for key_image in key_images {
            inner.key_images.insert(*key_image);
        }
        for tx_out in outputs {
            let index = inner.tx_outs.len() as u64;
            inner.index_by_public_key.insert(tx_out.public_key, index);
            inner.tx_outs.push(tx_out.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod mock_ledger_tests {
    use super::*;
    use vela_account_keys::AccountKey;
    use vela_crypto_keys::RistrettoPrivate;
    use vela_util_from_random::FromRandom;
    use vela_util_test_helper::get_seeded_rng;

    #[test]
    fn batch_with_spent_key_image_records_nothing() {
        let mut rng = get_seeded_rng();
        let ledger = MockLedger::new();

        let recipient = AccountKey::from_random(&mut rng);
        let tx_private_key = RistrettoPrivate::from_random(&mut rng);
        let tx_out = TxOut::new(100, &recipient.public_address(), &tx_private_key).unwrap();

        ledger.record_spends(&[KeyImage::from(1u64)], &[]).unwrap();
        assert_eq!(
            ledger.record_spends(&[KeyImage::from(2u64), KeyImage::from(1u64)], &[tx_out.clone()]),
            Err(Error::KeyImageAlreadySpent)
        );
        assert!(!ledger.contains_key_image(&KeyImage::from(2u64)).unwrap());
        assert!(!ledger.contains_tx_out_public_key(&tx_out.public_key).unwrap());
    }
}
