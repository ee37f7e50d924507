//! Response cache capability.
//!
//! The pipeline stores successful [`RawResponse`]s through the [`CacheStore`]
//! trait. Implementations own all synchronisation; concurrent writers for the
//! same key are allowed and the last write wins.

use crate::endpoint::CacheKey;
use crate::envelope::RawResponse;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Key/value store for decoded responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Return the live entry for `key`, if any.
    async fn get(&self, key: &CacheKey) -> Option<RawResponse>;

    /// Store `value` under `key` for `ttl`.
    async fn set(&self, key: &CacheKey, value: RawResponse, ttl: Duration);

    /// Drop the entry for `key`.
    async fn invalidate(&self, key: &CacheKey);

    /// Drop every entry.
    async fn clear(&self);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: RawResponse,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local TTL cache.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove expired entries.
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        self.entries
            .write()
            .await
            .retain(|_, entry| entry.is_fresh(now));
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<RawResponse> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Stale: drop it unless a writer refreshed it in the meantime.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_fresh(now)) {
            entries.remove(key);
        }
        None
    }

    async fn set(&self, key: &CacheKey, value: RawResponse, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.is_fresh(now));

        if ttl.is_zero() {
            return;
        }

        let entry = CacheEntry {
            value,
            expires_at: now + ttl,
        };
        entries.insert(key.clone(), entry);
    }

    async fn invalidate(&self, key: &CacheKey) {
        self.entries.write().await.remove(key);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl CacheStore for NoCache {
    async fn get(&self, _key: &CacheKey) -> Option<RawResponse> {
        None
    }

    async fn set(&self, _key: &CacheKey, _value: RawResponse, _ttl: Duration) {}

    async fn invalidate(&self, _key: &CacheKey) {}

    async fn clear(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use serde_json::json;

    fn key(path: &str) -> CacheKey {
        Endpoint::get(path).cache_key()
    }

    fn raw() -> RawResponse {
        RawResponse::new(200, json!({"response": {"revision": 1}}))
    }

    #[tokio::test(start_paused = true)]
    async fn entries_live_until_ttl() {
        let cache = MemoryCache::new();
        cache.set(&key("rules"), raw(), Duration::from_secs(60)).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&key("rules")).await, Some(raw()));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get(&key("rules")).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn purge_expired_drops_stale_entries() {
        let cache = MemoryCache::new();
        cache.set(&key("rules"), raw(), Duration::from_secs(10)).await;
        cache.set(&key("version"), raw(), Duration::from_secs(100)).await;
        assert_eq!(cache.len().await, 2);

        tokio::time::advance(Duration::from_secs(11)).await;
        cache.purge_expired().await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&key("version")).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_dropped_on_read() {
        let cache = MemoryCache::new();
        for id in 0..100 {
            let path = format!("vtc/5/events/{id}");
            cache.set(&key(&path), raw(), Duration::from_secs(1)).await;
            tokio::time::advance(Duration::from_secs(5)).await;
            assert!(cache.get(&key(&path)).await.is_none());
        }

        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn set_sweeps_expired_entries() {
        let cache = MemoryCache::new();
        for id in 0..10 {
            let path = format!("vtc/{id}");
            cache.set(&key(&path), raw(), Duration::from_secs(1)).await;
        }
        assert_eq!(cache.len().await, 10);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.set(&key("rules"), raw(), Duration::from_secs(60)).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&key("rules")).await.is_some());
    }

    #[tokio::test]
    async fn zero_ttl_is_not_stored() {
        let cache = MemoryCache::new();
        cache.set(&key("rules"), raw(), Duration::ZERO).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let cache = MemoryCache::new();
        let newer = RawResponse::new(200, json!({"response": {"revision": 2}}));
        cache.set(&key("rules"), raw(), Duration::from_secs(60)).await;
        cache.set(&key("rules"), newer.clone(), Duration::from_secs(60)).await;

        assert_eq!(cache.get(&key("rules")).await, Some(newer));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn invalidate_and_clear() {
        let cache = MemoryCache::new();
        cache.set(&key("rules"), raw(), Duration::from_secs(60)).await;
        cache.set(&key("servers"), raw(), Duration::from_secs(60)).await;

        cache.invalidate(&key("rules")).await;
        assert!(cache.get(&key("rules")).await.is_none());
        assert!(cache.get(&key("servers")).await.is_some());

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache = MemoryCache::new();
        let clone = cache.clone();
        clone.set(&key("rules"), raw(), Duration::from_secs(60)).await;
        assert!(cache.get(&key("rules")).await.is_some());
    }

    #[tokio::test]
    async fn no_cache_never_hits() {
        let cache = NoCache;
        cache.set(&key("rules"), raw(), Duration::from_secs(60)).await;
        assert!(cache.get(&key("rules")).await.is_none());
    }
}
