//! In-memory breach store.
//!
//! Fast, thread-safe storage suitable for development, testing,
//! and single-process deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};

use breachwatch_core::error::Result;
use breachwatch_core::traits::BreachStore;
use breachwatch_core::types::{BreachRecord, EmailHash};

/// In-memory breach store.
///
/// Uses a concurrent map for thread-safe access without requiring external
/// synchronization.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Primary storage: key → record
    records: DashMap<EmailHash, BreachRecord>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl BreachStore for MemoryStore {
    #[instrument(skip(self, key), fields(key = key.short()))]
    async fn lookup(&self, key: &EmailHash) -> Result<bool> {
        Ok(self.records.contains_key(key))
    }

    /// Inserts a record unless its key is already present.
    #[instrument(skip(self, record), fields(key = record.email_hash.short()))]
    async fn insert(&self, record: BreachRecord) -> Result<bool> {
        let inserted = match self.records.entry(record.email_hash.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        };
        debug!(inserted, "Inserted breach record");
        Ok(inserted)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breachwatch_crypto::hash_email;

    fn record(email: &str) -> BreachRecord {
        BreachRecord::days_ago(hash_email(email), 30)
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let store = MemoryStore::new();
        assert!(store.insert(record("test@example.com")).await.unwrap());

        assert!(store.lookup(&hash_email("test@example.com")).await.unwrap());
        assert!(!store.lookup(&hash_email("other@example.com")).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_ignored() {
        let store = MemoryStore::new();
        assert!(store.insert(record("a@b.co")).await.unwrap());
        assert!(!store.insert(record("A@B.CO")).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.count().await.unwrap(), 0);

        store.insert(record("a@b.co")).await.unwrap();
        store.insert(record("c@d.co")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_insert() {
        use std::sync::Arc;
        use tokio::task::JoinSet;

        let store = Arc::new(MemoryStore::new());
        let mut tasks = JoinSet::new();

        for i in 0..100u32 {
            let store = store.clone();
            tasks.spawn(async move {
                store
                    .insert(record(&format!("user{}@example.com", i)))
                    .await
                    .unwrap()
            });
        }

        while let Some(result) = tasks.join_next().await {
            assert!(result.unwrap());
        }

        assert_eq!(store.len(), 100);
    }
}
