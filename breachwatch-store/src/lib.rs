//! # BreachWatch Store
//!
//! Authoritative breach dataset backends for BreachWatch.
//!
//! This crate provides multiple storage backends:
//!
//! - **Memory**: Fast in-memory storage for development and testing
//! - **SQLite**: Persistent libSQL-backed storage (feature `sqlite`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use breachwatch_store::{seed_sample_data, MemoryStore, BreachStore};
//!
//! let store = MemoryStore::new();
//! seed_sample_data(&store).await?;
//!
//! let key = breachwatch_crypto::hash_email("test@example.com");
//! assert!(store.lookup(&key).await?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod seed;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
pub use seed::seed_sample_data;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

// Re-export the trait from core
pub use breachwatch_core::traits::BreachStore;
