//! # BreachWatch Lookup
//!
//! Cache-aside orchestration: raw input → opaque key → verdict cache →
//! authoritative store on a miss → write-back.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use breachwatch_cache::{CacheConfig, VerdictCache};
//! use breachwatch_lookup::BreachChecker;
//! use breachwatch_store::MemoryStore;
//!
//! let cache = VerdictCache::start(&CacheConfig::default())?;
//! let checker = BreachChecker::new(cache, Arc::new(MemoryStore::new()));
//!
//! match checker.check_key("someone@example.com").await? {
//!     CheckOutcome::Rejected => println!("not an email"),
//!     CheckOutcome::Hit { compromised } => println!("cached: {}", compromised),
//!     CheckOutcome::Miss { compromised } => println!("fresh: {}", compromised),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod checker;
pub mod stats;

pub use checker::BreachChecker;
pub use stats::LookupStats;

// Outcome type lives in core so every layer can name it
pub use breachwatch_core::types::CheckOutcome;
