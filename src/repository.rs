//! Repository - a collection behind a lock, with synchronous durability.
//!
//! Wraps one [`Collection`] together with the persistence gateway. Every
//! successful mutation flushes the full collection to its durable file
//! before the operation returns, so durability is synchronous with the
//! request/response cycle. The write lock is held across the
//! mutate-then-flush sequence, which keeps mutations of one collection
//! serialized even under a multi-threaded server.
//!
//! Flush failures are logged and swallowed: the in-memory mutation stands
//! and becomes the transient source of truth until the next successful
//! flush. Unflushed changes are lost on restart — an accepted non-goal of
//! this service (no crash-safety guarantee).

use std::sync::RwLock;

use serde_json::Value;

use crate::collection::Collection;
use crate::error::Error;
use crate::persist::FileStore;
use crate::record::Record;

/// One entity kind's live collection plus its durable store.
pub struct Repository<R: Record> {
    collection: RwLock<Collection<R>>,
    store: FileStore,
}

impl<R: Record> Repository<R> {
    /// Load the collection from durable storage (creating an empty,
    /// header-only store if absent).
    pub fn load(store: FileStore) -> Result<Self, Error> {
        let records = store.load::<R>()?;
        Ok(Self {
            collection: RwLock::new(Collection::from_records(records)),
            store,
        })
    }

    /// Snapshot of the current records, in insertion order.
    pub fn all(&self) -> Result<Vec<R>, Error> {
        let collection = self.collection.read().map_err(|_| lock_poisoned())?;
        Ok(collection.all().to_vec())
    }

    /// Look up a record by key.
    pub fn find_by_key(&self, key: &str) -> Result<Option<R>, Error> {
        let collection = self.collection.read().map_err(|_| lock_poisoned())?;
        Ok(collection.find_by_key(key).cloned())
    }

    /// Insert a record and flush. `DuplicateKey` if the key exists.
    pub fn insert(&self, record: R) -> Result<R, Error> {
        let mut collection = self.collection.write().map_err(|_| lock_poisoned())?;
        let created = collection.insert(record)?;
        self.flush(&collection);
        Ok(created)
    }

    /// Merge `patch` into the record with key `key`, in place, and flush.
    /// `NotFound` if absent; `Validation` if the patch is malformed.
    pub fn update_by_key(&self, key: &str, patch: &Value) -> Result<R, Error> {
        let mut collection = self.collection.write().map_err(|_| lock_poisoned())?;
        let updated = collection.update_by_key(key, patch)?;
        self.flush(&collection);
        Ok(updated)
    }

    /// Remove and return the record with key `key`, then flush.
    pub fn delete_by_key(&self, key: &str) -> Result<R, Error> {
        let mut collection = self.collection.write().map_err(|_| lock_poisoned())?;
        let removed = collection.delete_by_key(key)?;
        self.flush(&collection);
        Ok(removed)
    }

    /// Rewrite the durable store from the current collection. A failure is
    /// logged and swallowed; the in-memory mutation is not rolled back.
    fn flush(&self, collection: &Collection<R>) {
        if let Err(err) = self.store.flush::<R>(collection.all()) {
            tracing::error!(
                collection = R::COLLECTION,
                error = %err,
                "flush failed; in-memory state retained until next successful flush"
            );
        }
    }
}

fn lock_poisoned() -> Error {
    Error::Persistence("collection lock poisoned".into())
}
