//! Time-boxed in-memory cache keyed by resolution key.
//!
//! Entries are never evicted; an entry older than the caller's TTL is treated as absent
//! and overwritten by the next successful compute. Timestamps come from
//! [`tokio::time::Instant`], so tests can move time with `tokio::time::advance`.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default freshness window: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Keyed store of `(value, fetched_at)`.
///
/// Concurrent misses on the same key are not coalesced: each caller runs its own compute
/// and the last successful write wins.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any.
    pub async fn get(&self, key: &K, ttl: Duration) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(ttl))
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` stamped with the current time, replacing any previous entry.
    pub async fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            fetched_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Returns the fresh cached value, or runs `compute` and caches its `Ok` output.
    /// Errors are returned to the caller and leave the table untouched.
    pub async fn get_or_compute<F, Fut, E>(&self, key: K, ttl: Duration, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key, ttl).await {
            return Ok(value);
        }
        let value = compute().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn counted(calls: &AtomicUsize, value: &str) -> Result<String, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl_skips_compute() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        let a = cache
            .get_or_compute("k", DEFAULT_TTL, || counted(&calls, "v1"))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        let b = cache
            .get_or_compute("k", DEFAULT_TTL, || counted(&calls, "v2"))
            .await
            .unwrap();

        assert_eq!(a, "v1");
        assert_eq!(b, "v1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_recomputes_and_overwrites() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        cache
            .get_or_compute("k", DEFAULT_TTL, || counted(&calls, "old"))
            .await
            .unwrap();
        tokio::time::advance(DEFAULT_TTL + Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"k", DEFAULT_TTL).await, None);

        let fresh = cache
            .get_or_compute("k", DEFAULT_TTL, || counted(&calls, "new"))
            .await
            .unwrap();
        assert_eq!(fresh, "new");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get(&"k", DEFAULT_TTL).await, Some("new".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_exactly_ttl_old_is_stale() {
        let cache = TtlCache::new();
        cache.insert("k", 1u32).await;
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(cache.get(&"k", Duration::from_secs(10)).await, None);
        assert_eq!(cache.get(&"k", Duration::from_secs(11)).await, Some(1));
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache: TtlCache<&str, String> = TtlCache::new();
        let err = cache
            .get_or_compute("k", DEFAULT_TTL, || async { Err::<String, _>("down") })
            .await
            .unwrap_err();
        assert_eq!(err, "down");
        assert!(cache.is_empty().await);

        let calls = AtomicUsize::new(0);
        cache
            .get_or_compute("k", DEFAULT_TTL, || counted(&calls, "up"))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = TtlCache::new();
        cache.insert("a", 1u8).await;
        cache.insert("b", 2u8).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
