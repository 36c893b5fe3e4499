// Copyright (c) 2025 The Vela Foundation

//! Data access abstraction for outputs stored in the ledger.

use crate::{key_bytes_to_u64, u64_to_key_bytes, Error};
use lmdb::{Database, DatabaseFlags, Environment, RwTransaction, Transaction, WriteFlags};
use vela_crypto_keys::CompressedRistrettoPublic;
use vela_transaction_core::tx::TxOut;
use vela_util_serial::{decode, encode};

// LMDB Database names.
pub const COUNTS_DB_NAME: &str = "tx_out_store:counts";
pub const TX_OUT_INDEX_BY_PUBLIC_KEY_DB_NAME: &str = "tx_out_store:tx_out_index_by_public_key";
pub const TX_OUT_BY_INDEX_DB_NAME: &str = "tx_out_store:tx_out_by_index";

// Keys used by the `counts` database.
pub const NUM_TX_OUTS_KEY: &str = "num_tx_outs";

/// Append-only store of outputs, indexed by insertion order and public key.
#[derive(Clone)]
pub struct TxOutStore {
    /// Aggregate counts
    /// * `NUM_TX_OUTS_KEY` --> Number (u64) of TxOuts in the ledger.
    counts: Database,

    /// TxOut by index. `u64_to_key_bytes(index) -> encode(&tx_out)`
    tx_out_by_index: Database,

    /// `tx_out.public_key -> u64_to_key_bytes(index)`
    tx_out_index_by_public_key: Database,
}

impl TxOutStore {
    /// Opens an existing TxOutStore.
    pub fn new(env: &Environment) -> Result<Self, Error> {
        Ok(TxOutStore {
            counts: env.open_db(Some(COUNTS_DB_NAME))?,
            tx_out_index_by_public_key: env.open_db(Some(TX_OUT_INDEX_BY_PUBLIC_KEY_DB_NAME))?,
            tx_out_by_index: env.open_db(Some(TX_OUT_BY_INDEX_DB_NAME))?,
        })
    }

    /// Creates a fresh TxOutStore on disk.
    pub fn create(env: &Environment) -> Result<(), Error> {
        let counts = env.create_db(Some(COUNTS_DB_NAME), DatabaseFlags::empty())?;
        env.create_db(
            Some(TX_OUT_INDEX_BY_PUBLIC_KEY_DB_NAME),
            DatabaseFlags::empty(),
        )?;
        env.create_db(Some(TX_OUT_BY_INDEX_DB_NAME), DatabaseFlags::empty())?;

        let mut db_transaction = env.begin_rw_txn()?;

        db_transaction.put(
            counts,
            &NUM_TX_OUTS_KEY,
            &u64_to_key_bytes(0),
            WriteFlags::empty(),
        )?;

        db_transaction.commit()?;
        Ok(())
    }

    /// Appends a TxOut to the end of the collection.
    /// Returns the index of the TxOut in the ledger, or an Error.
    pub fn push(&self, tx_out: &TxOut, db_transaction: &mut RwTransaction) -> Result<u64, Error> {
        let num_tx_outs: u64 = key_bytes_to_u64(db_transaction.get(self.counts, &NUM_TX_OUTS_KEY)?);
        let index: u64 = num_tx_outs;

        db_transaction.put(
            self.counts,
            &NUM_TX_OUTS_KEY,
            &u64_to_key_bytes(num_tx_outs + 1_u64),
            WriteFlags::empty(),
        )?;

        db_transaction.put(
            self.tx_out_index_by_public_key,
            &tx_out.public_key,
            &u64_to_key_bytes(index),
            WriteFlags::NO_OVERWRITE,
        )?;

        let tx_out_bytes: Vec<u8> = encode(tx_out)?;

        db_transaction.put(
            self.tx_out_by_index,
            &u64_to_key_bytes(index),
            &tx_out_bytes,
            WriteFlags::NO_OVERWRITE,
        )?;

        Ok(index)
    }

    /// Get the total number of TxOuts in the ledger.
    pub fn num_tx_outs<T: Transaction>(&self, db_transaction: &T) -> Result<u64, Error> {
        Ok(key_bytes_to_u64(
            db_transaction.get(self.counts, &NUM_TX_OUTS_KEY)?,
        ))
    }

    /// Returns the index of the TxOut with the given public key.
    pub fn get_tx_out_index_by_public_key<T: Transaction>(
        &self,
        tx_out_public_key: &CompressedRistrettoPublic,
        db_transaction: &T,
    ) -> Result<u64, Error> {
        let index_bytes = db_transaction.get(self.tx_out_index_by_public_key, tx_out_public_key)?;
        Ok(key_bytes_to_u64(index_bytes))
    }

    /// Gets a TxOut by its index in the ledger.
    pub fn get_tx_out_by_index<T: Transaction>(
        &self,
        index: u64,
        db_transaction: &T,
    ) -> Result<TxOut, Error> {
        let tx_out_bytes = db_transaction.get(self.tx_out_by_index, &u64_to_key_bytes(index))?;
        let tx_out: TxOut = decode(tx_out_bytes)?;
        Ok(tx_out)
    }

    /// Check if a TxOut exists in the store by its public key.
    pub fn contains_tx_out_by_public_key<T: Transaction>(
        &self,
        tx_out_public_key: &CompressedRistrettoPublic,
        db_transaction: &T,
    ) -> Result<bool, Error> {
        match db_transaction.get(self.tx_out_index_by_public_key, tx_out_public_key) {
            Ok(_) => Ok(true),
            Err(lmdb::Error::NotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
pub mod tx_out_store_tests {
    use super::*;
    use lmdb::Environment;
    use tempfile::TempDir;
    use vela_account_keys::AccountKey;
    use vela_crypto_keys::RistrettoPrivate;
    use vela_util_from_random::FromRandom;
    use vela_util_test_helper::get_seeded_rng;

    /// Create an LMDB environment that can be used for testing.
    pub fn get_env() -> (Environment, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let env = Environment::new()
            .set_max_dbs(10)
            .set_map_size(1_073_741_824)
            .open(temp_dir.path())
            .unwrap();
        (env, temp_dir)
    }

    fn init_tx_out_store() -> (TxOutStore, Environment, TempDir) {
        let (env, temp_dir) = get_env();
        TxOutStore::create(&env).unwrap();
        let tx_out_store = TxOutStore::new(&env).unwrap();
        (tx_out_store, env, temp_dir)
    }

    /// Creates a number of TxOuts, all to the same recipient.
    fn get_tx_outs(num_tx_outs: u32) -> Vec<TxOut> {
        let mut rng = get_seeded_rng();
        let recipient = AccountKey::from_random(&mut rng);
        (0..num_tx_outs)
            .map(|_i| {
                let tx_private_key = RistrettoPrivate::from_random(&mut rng);
                TxOut::new(100, &recipient.public_address(), &tx_private_key).unwrap()
            })
            .collect()
    }

    #[test]
    fn push_assigns_sequential_indices() {
        let (store, env, _temp_dir) = init_tx_out_store();
        let tx_outs = get_tx_outs(5);

        let mut db_transaction = env.begin_rw_txn().unwrap();
        for (i, tx_out) in tx_outs.iter().enumerate() {
            let index = store.push(tx_out, &mut db_transaction).unwrap();
            assert_eq!(index, i as u64);
        }
        db_transaction.commit().unwrap();

        let db_transaction = env.begin_ro_txn().unwrap();
        assert_eq!(store.num_tx_outs(&db_transaction).unwrap(), 5);
    }

    #[test]
    fn get_by_index_round_trips() {
        let (store, env, _temp_dir) = init_tx_out_store();
        let tx_outs = get_tx_outs(3);

        let mut db_transaction = env.begin_rw_txn().unwrap();
        for tx_out in &tx_outs {
            store.push(tx_out, &mut db_transaction).unwrap();
        }
        db_transaction.commit().unwrap();

        let db_transaction = env.begin_ro_txn().unwrap();
        for (i, tx_out) in tx_outs.iter().enumerate() {
            let recovered = store
                .get_tx_out_by_index(i as u64, &db_transaction)
                .unwrap();
            assert_eq!(recovered, *tx_out);
            assert_eq!(
                store
                    .get_tx_out_index_by_public_key(&tx_out.public_key, &db_transaction)
                    .unwrap(),
                i as u64
            );
        }
    }

    #[test]
    fn contains_by_public_key() {
        let (store, env, _temp_dir) = init_tx_out_store();
        let tx_outs = get_tx_outs(2);

        let mut db_transaction = env.begin_rw_txn().unwrap();
        store.push(&tx_outs[0], &mut db_transaction).unwrap();
        db_transaction.commit().unwrap();

        let db_transaction = env.begin_ro_txn().unwrap();
        assert!(store
            .contains_tx_out_by_public_key(&tx_outs[0].public_key, &db_transaction)
            .unwrap());
        assert!(!store
            .contains_tx_out_by_public_key(&tx_outs[1].public_key, &db_transaction)
            .unwrap());
    }

    #[test]
    fn duplicate_public_key_is_rejected() {
        let (store, env, _temp_dir) = init_tx_out_store();
        let tx_outs = get_tx_outs(1);

        let mut db_transaction = env.begin_rw_txn().unwrap();
        store.push(&tx_outs[0], &mut db_transaction).unwrap();
        assert_eq!(
            store.push(&tx_outs[0], &mut db_transaction),
            Err(Error::DuplicateOutputPublicKey)
        );
    }

    #[test]
    fn get_missing_index_fails() {
        let (store, env, _temp_dir) = init_tx_out_store();

        let db_transaction = env.begin_ro_txn().unwrap();
        assert_eq!(
            store.get_tx_out_by_index(0, &db_transaction),
            Err(Error::NotFound)
        );
    }
}
