// Copyright (c) 2025 The Vela Foundation

//! Data access abstraction for the set of spent key images.
//!
//! The set only ever grows. Once a key image is recorded, any later
//! transaction carrying it is a double spend.

use crate::{key_bytes_to_u64, u64_to_key_bytes, Error};
use lmdb::{Database, DatabaseFlags, Environment, RwTransaction, Transaction, WriteFlags};
use vela_transaction_core::KeyImage;

// LMDB Database names.
pub const COUNTS_DB_NAME: &str = "key_image_store:counts";
pub const KEY_IMAGES_DB_NAME: &str = "key_image_store:key_images";

// Keys used by the `counts` database.
pub const NUM_KEY_IMAGES_KEY: &str = "num_key_images";

/// Append-only store of spent key images.
#[derive(Clone)]
pub struct KeyImageStore {
    /// Aggregate counts
    /// * `NUM_KEY_IMAGES_KEY` --> Number (u64) of key images in the ledger.
    counts: Database,

    /// `key_image -> u64_to_key_bytes(spent_at_index)`
    key_images: Database,
}

impl KeyImageStore {
    /// Opens an existing KeyImageStore.
    pub fn new(env: &Environment) -> Result<Self, Error> {
        Ok(KeyImageStore {
            counts: env.open_db(Some(COUNTS_DB_NAME))?,
            key_images: env.open_db(Some(KEY_IMAGES_DB_NAME))?,
        })
    }

    /// Creates a fresh KeyImageStore on disk.
    pub fn create(env: &Environment) -> Result<(), Error> {
        let counts = env.create_db(Some(COUNTS_DB_NAME), DatabaseFlags::empty())?;
        env.create_db(Some(KEY_IMAGES_DB_NAME), DatabaseFlags::empty())?;

        let mut db_transaction = env.begin_rw_txn()?;

        db_transaction.put(
            counts,
            &NUM_KEY_IMAGES_KEY,
            &u64_to_key_bytes(0),
            WriteFlags::empty(),
        )?;

        db_transaction.commit()?;
        Ok(())
    }

    /// Records a key image as spent.
    ///
    /// Returns `KeyImageAlreadySpent` if the key image is already present.
    pub fn push(
        &self,
        key_image: &KeyImage,
        db_transaction: &mut RwTransaction,
    ) -> Result<(), Error> {
        let num_key_images: u64 =
            key_bytes_to_u64(db_transaction.get(self.counts, &NUM_KEY_IMAGES_KEY)?);

        db_transaction
            .put(
                self.key_images,
                key_image,
                &u64_to_key_bytes(num_key_images),
                WriteFlags::NO_OVERWRITE,
            )
            .map_err(|e| match e {
                lmdb::Error::KeyExist => Error::KeyImageAlreadySpent,
                other => Error::from(other),
            })?;

        db_transaction.put(
            self.counts,
            &NUM_KEY_IMAGES_KEY,
            &u64_to_key_bytes(num_key_images + 1_u64),
            WriteFlags::empty(),
        )?;

        Ok(())
    }

    /// Get the total number of key images in the ledger.
    pub fn num_key_images<T: Transaction>(&self, db_transaction: &T) -> Result<u64, Error> {
        Ok(key_bytes_to_u64(
            db_transaction.get(self.counts, &NUM_KEY_IMAGES_KEY)?,
        ))
    }

    /// Check if a key image has been spent.
    pub fn contains<T: Transaction>(
        &self,
        key_image: &KeyImage,
        db_transaction: &T,
    ) -> Result<bool, Error> {
        match db_transaction.get(self.key_images, key_image) {
            Ok(_) => Ok(true),
            Err(lmdb::Error::NotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
