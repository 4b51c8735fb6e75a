//! Common traits for BreachWatch.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BreachRecord, EmailHash};

// ═══════════════════════════════════════════════════════════════════════════════
// STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// The authoritative breach dataset.
///
/// The lookup path only ever calls [`lookup`](BreachStore::lookup). The other
/// operations exist for seeding and operational reporting.
///
/// Implementations might use:
/// - In-memory storage (for testing/development)
/// - SQLite (for single-node deployments)
#[async_trait]
pub trait BreachStore: Send + Sync {
    /// Returns whether `key` is present in the breach dataset.
    ///
    /// Any error is a hard failure for the current request; callers do not retry.
    async fn lookup(&self, key: &EmailHash) -> Result<bool>;

    /// Adds a record. Returns `false` if the key was already present.
    async fn insert(&self, record: BreachRecord) -> Result<bool>;

    /// Returns the number of records in the dataset.
    async fn count(&self) -> Result<u64>;
}
