//! In-memory store for testing.

use crate::{DurableStore, Result, StorageError, StorageFuture};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory durable store.
///
/// Backs the same trait as [`crate::JsonFileStore`] with a hash map, so
/// reducer and integration tests run without touching the filesystem.
/// Clones share the underlying records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<HashMap<String, Value>>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (for test assertions).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockPoisoned`] if the record lock is poisoned.
    pub fn record_count(&self) -> Result<usize> {
        Ok(self
            .records
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .len())
    }

    /// Synchronous peek at a stored record (for test assertions).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockPoisoned`] if the record lock is poisoned.
    pub fn peek(&self, key: &str) -> Result<Option<Value>> {
        Ok(self
            .records
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .get(key)
            .cloned())
    }
}

impl DurableStore for InMemoryStore {
    fn read_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<Value>> {
        let records = Arc::clone(&self.records);
        let key = key.to_owned();

        Box::pin(async move {
            let guard = records.lock().map_err(|_| StorageError::LockPoisoned)?;
            Ok(guard.get(&key).cloned())
        })
    }

    fn write_record<'a>(&'a self, key: &'a str, value: Value) -> StorageFuture<'a, ()> {
        let records = Arc::clone(&self.records);
        let key = key.to_owned();

        Box::pin(async move {
            let mut guard = records.lock().map_err(|_| StorageError::LockPoisoned)?;
            guard.insert(key, value);
            Ok(())
        })
    }

    fn remove_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        let records = Arc::clone(&self.records);
        let key = key.to_owned();

        Box::pin(async move {
            let mut guard = records.lock().map_err(|_| StorageError::LockPoisoned)?;
            guard.remove(&key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = InMemoryStore::new();

        store
            .write_record("events", json!([{"id": 1}]))
            .await
            .unwrap();

        let value = store.read_record("events").await.unwrap();
        assert_eq!(value, Some(json!([{"id": 1}])));
    }

    #[tokio::test]
    async fn read_absent_key_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.read_record("activeUser").await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_writer_wins() {
        let store = InMemoryStore::new();

        store.write_record("events", json!([1])).await.unwrap();
        store.write_record("events", json!([1, 2])).await.unwrap();

        assert_eq!(
            store.read_record("events").await.unwrap(),
            Some(json!([1, 2]))
        );
    }

    #[tokio::test]
    async fn remove_clears_record_and_tolerates_absence() {
        let store = InMemoryStore::new();

        store.write_record("activeUser", json!({})).await.unwrap();
        store.remove_record("activeUser").await.unwrap();
        assert_eq!(store.read_record("activeUser").await.unwrap(), None);

        // Removing again is not an error
        store.remove_record("activeUser").await.unwrap();
    }
}
