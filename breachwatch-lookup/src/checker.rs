//! Cache-aside breach checks.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use breachwatch_cache::VerdictCache;
use breachwatch_core::error::{BreachError, Result};
use breachwatch_core::traits::BreachStore;
use breachwatch_core::types::{CheckOutcome, EmailHash};
use breachwatch_crypto::validate_and_derive_key;

use crate::stats::{LookupCounters, LookupStats};

/// Answers "is this address breached?" from the cache when it can and from
/// the authoritative store when it must.
///
/// The checker owns no lock of its own. The store is always called with no
/// cache lock held, so two callers missing on the same key may both reach
/// the store and both write back. The verdict for a key is deterministic,
/// so the second write only repeats the first.
pub struct BreachChecker {
    cache: Arc<VerdictCache>,
    store: Arc<dyn BreachStore>,
    counters: LookupCounters,
}

impl BreachChecker {
    /// Creates a checker over an existing cache and store.
    pub fn new(cache: Arc<VerdictCache>, store: Arc<dyn BreachStore>) -> Self {
        Self {
            cache,
            store,
            counters: LookupCounters::default(),
        }
    }

    /// Checks a raw, user-supplied address.
    ///
    /// Malformed input yields [`CheckOutcome::Rejected`] before the cache or
    /// store are touched. A store failure yields
    /// [`BreachError::StoreUnavailable`] and leaves the cache as it was.
    #[instrument(skip_all)]
    pub async fn check_key(&self, raw: &str) -> Result<CheckOutcome> {
        self.counters.record_lookup();

        let Some(key) = validate_and_derive_key(raw) else {
            self.counters.record_rejected();
            debug!("Rejected malformed input");
            return Ok(CheckOutcome::Rejected);
        };

        self.resolve(&key).await
    }

    /// Checks an already-derived key.
    pub async fn check_hash(&self, key: &EmailHash) -> Result<CheckOutcome> {
        self.counters.record_lookup();
        self.resolve(key).await
    }

    #[instrument(skip(self, key), fields(key = key.short()))]
    async fn resolve(&self, key: &EmailHash) -> Result<CheckOutcome> {
        if let Some(compromised) = self.cache.get(key) {
            self.counters.record_hit();
            debug!(compromised, "Cache hit");
            return Ok(CheckOutcome::Hit { compromised });
        }
        self.counters.record_miss();

        let compromised = match self.store.lookup(key).await {
            Ok(found) => found,
            Err(e) => {
                self.counters.record_store_error();
                warn!(error = %e, "Store lookup failed");
                return Err(into_store_unavailable(e));
            }
        };

        self.cache.set(key.clone(), compromised);
        debug!(compromised, "Cache miss, verdict stored");
        Ok(CheckOutcome::Miss { compromised })
    }

    /// Returns the verdict cache.
    pub fn cache(&self) -> &Arc<VerdictCache> {
        &self.cache
    }

    /// Returns the authoritative store.
    pub fn store(&self) -> &Arc<dyn BreachStore> {
        &self.store
    }

    /// Returns a snapshot of the lookup counters.
    pub fn stats(&self) -> LookupStats {
        self.counters.snapshot()
    }
}

fn into_store_unavailable(err: BreachError) -> BreachError {
    match err {
        BreachError::StoreUnavailable(_) => err,
        other => BreachError::StoreUnavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use breachwatch_core::types::BreachRecord;
    use breachwatch_crypto::hash_email;
    use breachwatch_store::{seed_sample_data, MemoryStore};

    const PADDED_INPUT: &str = "  Test@Example.COM\0";
    const PADDED_HASH: &str = "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b";

    /// Store that answers a fixed verdict and counts calls.
    #[derive(Default)]
    struct CountingStore {
        verdict: bool,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn answering(verdict: bool) -> Self {
            Self {
                verdict,
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BreachStore for CountingStore {
        async fn lookup(&self, _key: &EmailHash) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(BreachError::Database("disk I/O error".into()));
            }
            Ok(self.verdict)
        }

        async fn insert(&self, _record: BreachRecord) -> Result<bool> {
            Ok(true)
        }

        async fn count(&self) -> Result<u64> {
            Ok(0)
        }
    }

    fn checker_with(store: Arc<CountingStore>, ttl: Duration) -> BreachChecker {
        BreachChecker::new(Arc::new(VerdictCache::new(ttl)), store)
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let store = Arc::new(CountingStore::answering(true));
        let checker = checker_with(store.clone(), Duration::from_secs(900));

        let first = checker.check_key(PADDED_INPUT).await.unwrap();
        assert_eq!(first, CheckOutcome::Miss { compromised: true });
        assert_eq!(store.calls(), 1);

        let key = EmailHash::from_hex(PADDED_HASH).unwrap();
        assert_eq!(checker.cache().get(&key), Some(true));

        let second = checker.check_key(PADDED_INPUT).await.unwrap();
        assert_eq!(second, CheckOutcome::Hit { compromised: true });
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_equivalent_inputs_share_entry() {
        let store = Arc::new(CountingStore::answering(false));
        let checker = checker_with(store.clone(), Duration::from_secs(900));

        checker.check_key("user@domain.com").await.unwrap();
        let outcome = checker.check_key("  USER@Domain.com ").await.unwrap();
        assert_eq!(outcome, CheckOutcome::Hit { compromised: false });
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejected_touches_nothing() {
        let store = Arc::new(CountingStore::answering(true));
        let checker = checker_with(store.clone(), Duration::from_secs(900));

        let outcome = checker.check_key("not-an-email").await.unwrap();
        assert_eq!(outcome, CheckOutcome::Rejected);
        assert_eq!(store.calls(), 0);
        assert!(checker.cache().is_empty());

        let stats = checker.stats();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.cache_hits + stats.cache_misses, 0);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache_untouched() {
        let store = Arc::new(CountingStore::answering(true));
        store.fail.store(true, Ordering::SeqCst);
        let checker = checker_with(store.clone(), Duration::from_secs(900));

        let err = checker.check_key("test@example.com").await.unwrap_err();
        assert!(matches!(err, BreachError::StoreUnavailable(ref msg) if msg.contains("disk I/O")));
        assert!(checker.cache().is_empty());
        assert_eq!(checker.stats().store_errors, 1);

        // Recovers once the store does; no stale default was cached
        store.fail.store(false, Ordering::SeqCst);
        let outcome = checker.check_key("test@example.com").await.unwrap();
        assert_eq!(outcome, CheckOutcome::Miss { compromised: true });
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_goes_back_to_store() {
        let store = Arc::new(CountingStore::answering(true));
        let checker = checker_with(store.clone(), Duration::from_millis(5));

        checker.check_key("test@example.com").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let outcome = checker.check_key("test@example.com").await.unwrap();
        assert_eq!(outcome, CheckOutcome::Miss { compromised: true });
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_check_hash_direct() {
        let store = Arc::new(CountingStore::answering(false));
        let checker = checker_with(store.clone(), Duration::from_secs(900));

        let key = hash_email("someone@example.org");
        assert_eq!(
            checker.check_hash(&key).await.unwrap(),
            CheckOutcome::Miss { compromised: false }
        );
        assert_eq!(
            checker.check_hash(&key).await.unwrap(),
            CheckOutcome::Hit { compromised: false }
        );

        let stats = checker.stats();
        assert_eq!(stats.lookups, 2);
        assert_eq!(stats.lookups, stats.cache_hits + stats.cache_misses);
    }

    #[tokio::test]
    async fn test_concurrent_checks_same_key() {
        let store = Arc::new(CountingStore::answering(true));
        let checker = Arc::new(checker_with(store.clone(), Duration::from_secs(900)));

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..32 {
            let checker = checker.clone();
            tasks.spawn(async move { checker.check_key("race@example.com").await.unwrap() });
        }
        while let Some(outcome) = tasks.join_next().await {
            assert_eq!(outcome.unwrap().compromised(), Some(true));
        }

        // Redundant store calls are allowed; the cache still ends with one entry
        assert!(store.calls() >= 1);
        assert_eq!(checker.cache().len(), 1);
        let stats = checker.stats();
        assert_eq!(stats.cache_hits + stats.cache_misses, 32);
    }

    /// Store that writes to and reads from the cache while answering.
    struct CacheTouchingStore {
        cache: Arc<VerdictCache>,
    }

    #[async_trait]
    impl BreachStore for CacheTouchingStore {
        async fn lookup(&self, _key: &EmailHash) -> Result<bool> {
            self.cache.set(hash_email("other@example.com"), false);
            let _ = self.cache.len();
            Ok(true)
        }

        async fn insert(&self, _record: BreachRecord) -> Result<bool> {
            Ok(true)
        }

        async fn count(&self) -> Result<u64> {
            Ok(0)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_store_called_without_cache_lock() {
        let cache = Arc::new(VerdictCache::new(Duration::from_secs(900)));
        let store = Arc::new(CacheTouchingStore { cache: cache.clone() });
        let checker = Arc::new(BreachChecker::new(cache.clone(), store));

        // A guard held across the store call would block this task forever
        let task = tokio::spawn({
            let checker = checker.clone();
            async move { checker.check_key("test@example.com").await }
        });
        let outcome = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("lookup blocked on the cache lock")
            .unwrap()
            .unwrap();

        assert_eq!(outcome, CheckOutcome::Miss { compromised: true });
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_against_seeded_memory_store() {
        let store = Arc::new(MemoryStore::new());
        seed_sample_data(store.as_ref()).await.unwrap();
        let checker = BreachChecker::new(Arc::new(VerdictCache::new(Duration::from_secs(900))), store);

        assert_eq!(
            checker.check_key("Breach@Test.org").await.unwrap(),
            CheckOutcome::Miss { compromised: true }
        );
        assert_eq!(
            checker.check_key("clean@example.com").await.unwrap(),
            CheckOutcome::Miss { compromised: false }
        );
        assert_eq!(
            checker.check_key("clean@example.com").await.unwrap(),
            CheckOutcome::Hit { compromised: false }
        );

        let stats = checker.stats();
        assert_eq!(stats.lookups, 3);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 2);
    }
}
