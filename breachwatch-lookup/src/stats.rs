//! Lookup counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Live counters updated on every lookup.
#[derive(Debug, Default)]
pub(crate) struct LookupCounters {
    lookups: AtomicU64,
    rejected: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    store_errors: AtomicU64,
}

impl LookupCounters {
    pub(crate) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> LookupStats {
        LookupStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time lookup statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupStats {
    /// Calls to `check_key`, including rejected ones
    pub lookups: u64,
    /// Inputs rejected as malformed
    pub rejected: u64,
    /// Verdicts served from the cache
    pub cache_hits: u64,
    /// Verdicts that had to go to the store
    pub cache_misses: u64,
    /// Store calls that failed
    pub store_errors: u64,
}

impl LookupStats {
    /// Returns the fraction of cache consultations that hit, in `[0, 1]`.
    pub fn hit_ratio(&self) -> f64 {
        let consulted = self.cache_hits + self.cache_misses;
        if consulted == 0 {
            0.0
        } else {
            self.cache_hits as f64 / consulted as f64
        }
    }
}
