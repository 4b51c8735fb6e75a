//! In-memory TTL cache for breach verdicts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use breachwatch_core::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_SWEEP_INTERVAL_SECS};
use breachwatch_core::error::{BreachError, Result};
use breachwatch_core::types::EmailHash;

use crate::sweeper;

/// Upper bound on a configured TTL (30 days).
const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Cache entry with an absolute expiry.
#[derive(Clone, Copy)]
struct CacheEntry {
    value: bool,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window of every entry, in seconds
    pub ttl_seconds: u64,
    /// Interval between background sweeps, in seconds
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECS,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl CacheConfig {
    /// Returns the TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Returns the sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    /// Checks that both timings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_seconds == 0 || self.ttl_seconds > MAX_TTL_SECS {
            return Err(BreachError::Config(format!(
                "cache TTL must be between 1 and {} seconds, got {}",
                MAX_TTL_SECS, self.ttl_seconds
            )));
        }
        if self.sweep_interval_seconds == 0 {
            return Err(BreachError::Config(
                "cache sweep interval must be at least 1 second".into(),
            ));
        }
        Ok(())
    }
}

/// Concurrent TTL cache of breach verdicts.
///
/// Readers share the lock; `set`, `delete` and the sweep take it exclusively
/// for the mutation only. No method performs I/O or returns an error.
///
/// Expiry is lazy: an expired entry reads as absent but stays in the map
/// until a sweep removes it, so [`len`](Self::len) is an occupancy figure,
/// not a count of live verdicts.
pub struct VerdictCache {
    entries: RwLock<HashMap<EmailHash, CacheEntry>>,
    ttl: Duration,
    cancel: CancellationToken,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl VerdictCache {
    /// Creates a cache with the given TTL and no background sweep.
    ///
    /// TTLs above 30 days are clamped to 30 days. Expired entries are only
    /// reclaimed by explicit [`remove_expired`](Self::remove_expired) calls.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: ttl.min(Duration::from_secs(MAX_TTL_SECS)),
            cancel: CancellationToken::new(),
            sweeper: Mutex::new(None),
        }
    }

    /// Creates a cache from `config` and starts its background sweep.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: &CacheConfig) -> Result<Arc<Self>> {
        config.validate()?;
        Ok(Self::with_sweeper(config.ttl(), config.sweep_interval()))
    }

    /// Creates a cache and spawns a sweep every `sweep_interval`.
    ///
    /// The sweep task only holds a weak reference; it stops when the cache
    /// is dropped or [`shutdown`](Self::shutdown) is called.
    ///
    /// # Panics
    ///
    /// Panics if `sweep_interval` is zero or if called outside a tokio runtime.
    pub fn with_sweeper(ttl: Duration, sweep_interval: Duration) -> Arc<Self> {
        let cache = Arc::new(Self::new(ttl));
        let handle = sweeper::spawn(Arc::downgrade(&cache), sweep_interval, cache.cancel.clone());
        *cache.sweeper.lock() = Some(handle);

        info!(
            ttl_secs = cache.ttl.as_secs(),
            sweep_interval_secs = sweep_interval.as_secs(),
            "Verdict cache started"
        );
        cache
    }

    /// Returns the cached verdict for `key`, or `None` if absent or expired.
    ///
    /// Never removes anything, even when it finds an expired entry.
    pub fn get(&self, key: &EmailHash) -> Option<bool> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &EmailHash, now: Instant) -> Option<bool> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|e| e.is_live_at(now))
            .map(|e| e.value)
    }

    /// Stores `value` for `key`, fresh for one TTL from now.
    ///
    /// Overwrites any existing entry; concurrent writers race and the last one wins.
    pub fn set(&self, key: EmailHash, value: bool) {
        self.set_at(key, value, Instant::now());
    }

    fn set_at(&self, key: EmailHash, value: bool, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + self.ttl,
        };
        self.entries.write().insert(key, entry);
    }

    /// Removes the entry for `key`, if any.
    pub fn delete(&self, key: &EmailHash) {
        self.entries.write().remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries and returns how many were removed.
    pub fn remove_expired(&self) -> usize {
        self.remove_expired_at(Instant::now())
    }

    fn remove_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_live_at(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Removed expired verdicts");
        }
        removed
    }

    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats_at(Instant::now())
    }

    fn stats_at(&self, now: Instant) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| !e.is_live_at(now)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            live_entries: entries.len().saturating_sub(expired),
            ttl_seconds: self.ttl.as_secs(),
        }
    }

    /// Returns true while the background sweep task is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the background sweep and waits for it to exit.
    ///
    /// Reads and writes keep working afterwards; only eager reclamation stops.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for VerdictCache {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub live_entries: usize,
    pub ttl_seconds: u64,
}
