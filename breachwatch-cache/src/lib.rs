//! TTL cache for BreachWatch verdicts.
//!
//! In-memory map from [`EmailHash`](breachwatch_core::EmailHash) to a boolean
//! verdict. Reads expire entries lazily; a background sweep reclaims memory
//! for entries nobody reads again.

mod cache;
mod sweeper;

pub use cache::{CacheConfig, CacheStats, VerdictCache};
