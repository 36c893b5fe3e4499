// Copyright (c) 2025 The Vela Foundation

//! Durable storage for the outputs and spent key images of the chain.
//!
//! The ledger answers two questions for the validator: does this output
//! exist, and has this key image been spent. Both sets are append-only and
//! survive restarts; all spends of a transaction are recorded in a single
//! LMDB write transaction so a crash can never record half a transaction.

#![deny(missing_docs)]

mod error;
mod key_image_store;
mod tx_out_store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::Error;
pub use key_image_store::KeyImageStore;
pub use tx_out_store::TxOutStore;

use lmdb::{Environment, Transaction};
use std::{path::Path, sync::Arc};
use tracing::debug;
use vela_crypto_keys::CompressedRistrettoPublic;
use vela_transaction_core::{tx::TxOut, KeyImage};

const MAX_LMDB_DATABASES: u32 = 10;
const MAX_LMDB_FILE_SIZE: usize = 1_099_511_627_776;

/// The ledger state a validator needs: the output set and the spent key
/// image set.
pub trait Ledger: Send + Sync {
    /// Returns true if the key image has been spent.
    fn contains_key_image(&self, key_image: &KeyImage) -> Result<bool, Error>;

    /// Returns true if an output with this public key exists.
    fn contains_tx_out_public_key(
        &self,
        public_key: &CompressedRistrettoPublic,
    ) -> Result<bool, Error>;

    /// The index of the output with this public key.
    fn get_tx_out_index_by_public_key(
        &self,
        public_key: &CompressedRistrettoPublic,
    ) -> Result<u64, Error>;

    /// The output at the given index.
    fn get_tx_out_by_index(&self, index: u64) -> Result<TxOut, Error>;

    /// The total number of outputs in the ledger.
    fn num_tx_outs(&self) -> Result<u64, Error>;

    /// The total number of spent key images in the ledger.
    fn num_key_images(&self) -> Result<u64, Error>;

    /// Record the effects of a transaction: its spent key images and its new
    /// outputs, atomically.
    ///
    /// Either everything is recorded or nothing is. Fails with
    /// `KeyImageAlreadySpent` or `DuplicateOutputPublicKey` without recording
    /// anything if any key image or output is already present.
    fn record_spends(&self, key_images: &[KeyImage], outputs: &[TxOut]) -> Result<(), Error>;
}

/// An LMDB-backed [`Ledger`].
#[derive(Clone)]
pub struct LedgerDB {
    env: Arc<Environment>,
    tx_out_store: TxOutStore,
    key_image_store: KeyImageStore,
}

impl LedgerDB {
    /// Creates a fresh ledger database in the given directory and opens it.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let env = Self::open_env(path)?;
        TxOutStore::create(&env)?;
        KeyImageStore::create(&env)?;

        let tx_out_store = TxOutStore::new(&env)?;
        let key_image_store = KeyImageStore::new(&env)?;
        Ok(Self {
            env: Arc::new(env),
            tx_out_store,
            key_image_store,
        })
    }

    /// Opens an existing ledger database.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let env = Self::open_env(path)?;
        let tx_out_store = TxOutStore::new(&env)?;
        let key_image_store = KeyImageStore::new(&env)?;
        Ok(Self {
            env: Arc::new(env),
            tx_out_store,
            key_image_store,
        })
    }

    fn open_env(path: &Path) -> Result<Environment, Error> {
        Ok(Environment::new()
            .set_max_dbs(MAX_LMDB_DATABASES)
            .set_map_size(MAX_LMDB_FILE_SIZE)
            .open(path)?)
    }
}

impl Ledger for LedgerDB {
    fn contains_key_image(&self, key_image: &KeyImage) -> Result<bool, Error> {
        let db_transaction = self.env.begin_ro_txn()?;
        self.key_image_store.contains(key_image, &db_transaction)
    }

    fn contains_tx_out_public_key(
        &self,
        public_key: &CompressedRistrettoPublic,
    ) -> Result<bool, Error> {
        let db_transaction = self.env.begin_ro_txn()?;
        self.tx_out_store
            .contains_tx_out_by_public_key(public_key, &db_transaction)
    }

    fn get_tx_out_index_by_public_key(
        &self,
        public_key: &CompressedRistrettoPublic,
    ) -> Result<u64, Error> {
        let db_transaction = self.env.begin_ro_txn()?;
        self.tx_out_store
            .get_tx_out_index_by_public_key(public_key, &db_transaction)
    }

    fn get_tx_out_by_index(&self, index: u64) -> Result<TxOut, Error> {
        let db_transaction = self.env.begin_ro_txn()?;
        self.tx_out_store
            .get_tx_out_by_index(index, &db_transaction)
    }

    fn num_tx_outs(&self) -> Result<u64, Error> {
        let db_transaction = self.env.begin_ro_txn()?;
        self.tx_out_store.num_tx_outs(&db_transaction)
    }

    fn num_key_images(&self) -> Result<u64, Error> {
        let db_transaction = self.env.begin_ro_txn()?;
        self.key_image_store.num_key_images(&db_transaction)
    }

    fn record_spends(&self, key_images: &[KeyImage], outputs: &[TxOut]) -> Result<(), Error> {
        let mut db_transaction = self.env.begin_rw_txn()?;

        for key_image in key_images {
            self.key_image_store
                .push(key_image, &mut db_transaction)?;
        }

        for tx_out in outputs {
            self.tx_out_store.push(tx_out, &mut db_transaction)?;
        }

        db_transaction.commit()?;
        debug!(
            num_key_images = key_images.len(),
            num_outputs = outputs.len(),
            "recorded spends"
        );
        Ok(())
    }
}

/// Fixed-width big-endian representation of a u64, used as an LMDB key so
/// that numeric order matches lexicographic order.
pub fn u64_to_key_bytes(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Recover a u64 from the bytes produced by [`u64_to_key_bytes`].
///
/// Panics if `bytes` is not exactly 8 bytes, which indicates a corrupt
/// database.
pub fn key_bytes_to_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_be_bytes(buf)
}
