//! redb-backed collection store
//!
//! Every entity kind is persisted as a single JSON array under a fixed
//! collection name, read and rewritten in full on every mutation. There is
//! deliberately no per-record update primitive.
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `collections` | collection name | JSON-serialized `Vec<T>` |
//!
//! # Consistency
//!
//! The whole read-mutate-write cycle of [`CollectionStore::update`] runs
//! inside one redb write transaction. redb serializes writers, so two
//! concurrent mutations of the same collection cannot silently lose an
//! update; the second simply waits and sees the first one's result.
//!
//! A value that fails to parse on load is treated as an empty collection
//! (logged, never surfaced to the caller).

pub mod repository;

pub use repository::{Entity, Repository};

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table holding one JSON array per collection
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

// ── Collection names ────────────────────────────────────────────────

pub const RESERVATIONS: &str = "reservations";
pub const ORDERS: &str = "orders";
pub const MENU_ITEMS: &str = "menu_items";
pub const GALLERY_IMAGES: &str = "gallery_images";
pub const CONTACT_MESSAGES: &str = "contact_messages";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection store backed by redb
#[derive(Clone)]
pub struct CollectionStore {
    db: Arc<Database>,
}

impl CollectionStore {
    /// Open or create the database at the given path.
    ///
    /// redb commits are durable once `commit()` returns (copy-on-write with
    /// atomic pointer swap), so a crash mid-save leaves the previous state
    /// intact rather than a partial write.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Load a collection. Absent or unparsable values yield an empty vec;
    /// parse failures are logged, not reported.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        match self.try_load(collection) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(collection, error = %e, "failed to load collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        match table.get(collection)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite a collection with the given items.
    pub fn save<T: Serialize>(&self, collection: &str, items: &[T]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            let value = serde_json::to_vec(items)?;
            table.insert(collection, value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Run a read-mutate-write cycle on a collection inside one write
    /// transaction. The closure's return value is passed through.
    pub fn update<T, R>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> StoreResult<R>
    where
        T: Serialize + DeserializeOwned,
    {
        let write_txn = self.db.begin_write()?;
        let result = {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;

            let existing: Option<Vec<u8>> = table.get(collection)?.map(|g| g.value().to_vec());
            let mut items: Vec<T> = match existing {
                Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                    tracing::warn!(collection, error = %e, "unparsable collection, resetting to empty");
                    Vec::new()
                }),
                None => Vec::new(),
            };

            let result = f(&mut items);

            let value = serde_json::to_vec(&items)?;
            table.insert(collection, value.as_slice())?;
            result
        };
        write_txn.commit()?;
        Ok(result)
    }
}
