//! Collection - ordered in-memory record sequence with unique keys.
//!
//! One collection per entity kind. Insertion order is preserved and is the
//! order every read reports; there is no implicit sorting. The key field is
//! unique across the collection at all times: inserts reject duplicates, and
//! updates replace the matched record in place so its position survives even
//! when the update changes the key value itself.

use serde_json::Value;

use crate::error::Error;
use crate::record::Record;

/// An ordered, uniquely-keyed sequence of records of one kind.
#[derive(Debug)]
pub struct Collection<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a collection from already-decoded records, keeping their order.
    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    /// The current records, in insertion order.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    /// First record whose key equals `key` under exact string equality.
    /// No case folding, no trimming — trimming happens at input time only.
    pub fn find_by_key(&self, key: &str) -> Option<&R> {
        self.records.iter().find(|r| r.key() == key)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }

    /// Append a record. Fails with `DuplicateKey` if its key already exists,
    /// leaving the collection unchanged.
    pub fn insert(&mut self, record: R) -> Result<R, Error> {
        if self.position(record.key()).is_some() {
            return Err(Error::DuplicateKey {
                collection: R::COLLECTION,
                key: record.key().to_string(),
            });
        }
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replace the record with key `key` by itself merged with `patch`.
    ///
    /// The replacement lands at the same position in the sequence, even when
    /// the patch changes the key value. Fails with `NotFound` if no record
    /// has the key; a patch that fails validation leaves the collection
    /// unchanged.
    pub fn update_by_key(&mut self, key: &str, patch: &Value) -> Result<R, Error> {
        let index = self.position(key).ok_or_else(|| Error::NotFound {
            collection: R::COLLECTION,
            key: key.to_string(),
        })?;
        let updated = self.records[index].merge(patch)?;
        self.records[index] = updated.clone();
        Ok(updated)
    }

    /// Remove and return the record with key `key`, shifting later records
    /// down by one. Fails with `NotFound` if absent.
    pub fn delete_by_key(&mut self, key: &str) -> Result<R, Error> {
        let index = self.position(key).ok_or_else(|| Error::NotFound {
            collection: R::COLLECTION,
            key: key.to_string(),
        })?;
        Ok(self.records.remove(index))
    }
}
