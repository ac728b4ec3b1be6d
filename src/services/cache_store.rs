//! Expiring cache over the durable store.
//!
//! Every entry lives under the `youtube_cache:` prefix as a JSON
//! [`CacheEntry`]. Expiry is checked lazily on read; `clear_expired` sweeps
//! the namespace on demand. Store failures are logged and degrade to cache
//! misses or no-op writes, never errors.

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::cache_entry::CacheEnvelope;
use crate::domain::models::{CacheConfig, CacheEntry};
use crate::domain::ports::{Clock, DurableStore};

/// Store prefix owned by the cache.
pub const CACHE_PREFIX: &str = "youtube_cache:";

/// Side index of cache keys for stores that cannot list keys.
pub const CACHE_INDEX_KEY: &str = "youtube_cache_index";

/// Trim and lowercase a user query so equivalent queries share a cache slot.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Cache slot identifier derived from (operation, normalized query, result bound).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(kind: &str, query: &str, bound: u32) -> Self {
        Self(format!("{kind}_{}_{bound}", normalize_query(query)))
    }

    pub fn search(query: &str, max_results: u32) -> Self {
        Self::new("search", query, max_results)
    }

    pub fn trending(term: &str, max_results: u32) -> Self {
        Self::new("trending", term, max_results)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full key as written to the durable store.
    pub fn storage_key(&self) -> String {
        format!("{CACHE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct CacheStore {
    store: Arc<dyn DurableStore>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    /// Serializes read-modify-write of the side index.
    index_lock: Mutex<()>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn DurableStore>, clock: Arc<dyn Clock>, config: CacheConfig) -> Self {
        Self {
            store,
            clock,
            config,
            index_lock: Mutex::new(()),
        }
    }

    /// Fetch the payload for `key` if present and fresh.
    ///
    /// Stale or unreadable entries are removed and reported as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let storage_key = key.storage_key();
        let raw = match self.store.get(&storage_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "removing corrupt cache entry");
                self.remove_key(&storage_key).await;
                return None;
            }
        };

        let now = self.clock.now();
        if entry.is_fresh(now) {
            debug!(
                key = %key,
                ttl_ms = entry.time_to_live(now).num_milliseconds(),
                "cache hit"
            );
            Some(entry.data)
        } else {
            debug!(key = %key, "cache entry expired");
            self.remove_key(&storage_key).await;
            None
        }
    }

    /// Write `data` under `key`, replacing any previous entry.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &CacheKey, data: &T, ttl: Duration) {
        let entry = CacheEntry::new(data, self.clock.now(), ttl);
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to serialize cache entry");
                return;
            }
        };

        let storage_key = key.storage_key();
        if let Err(e) = self.store.set(&storage_key, &raw).await {
            warn!(key = %key, error = %e, "cache write failed");
            return;
        }
        self.index_insert(&storage_key).await;
        debug!(key = %key, ttl_ms = ttl.num_milliseconds(), "cached");
    }

    /// Write with the short TTL used for query results.
    pub async fn set_default<T: Serialize + ?Sized>(&self, key: &CacheKey, data: &T) {
        self.set(key, data, self.config.default_ttl()).await;
    }

    /// Write with the long TTL used for trending results.
    pub async fn set_trending<T: Serialize + ?Sized>(&self, key: &CacheKey, data: &T) {
        self.set(key, data, self.config.trending_ttl()).await;
    }

    /// Remove every expired or unreadable entry. Returns how many were removed.
    pub async fn clear_expired(&self) -> usize {
        let now = self.clock.now();
        let mut cleared = 0;

        for storage_key in self.cache_keys().await {
            let expired = match self.store.get(&storage_key).await {
                Ok(Some(raw)) => serde_json::from_str::<CacheEnvelope>(&raw)
                    .map_or(true, |envelope| envelope.is_expired(now)),
                // Index entry pointing at nothing
                Ok(None) => {
                    self.index_remove(&storage_key).await;
                    false
                }
                Err(e) => {
                    warn!(key = %storage_key, error = %e, "skipping unreadable cache key");
                    false
                }
            };

            if expired && self.remove_key(&storage_key).await {
                cleared += 1;
            }
        }

        if cleared > 0 {
            info!(cleared, "cleared expired cache entries");
        }
        cleared
    }

    /// Remove every entry in the cache namespace. Returns how many were removed.
    pub async fn clear_all(&self) -> usize {
        let mut cleared = 0;
        for storage_key in self.cache_keys().await {
            if self.remove_key(&storage_key).await {
                cleared += 1;
            }
        }

        if !self.store.supports_key_listing() {
            if let Err(e) = self.store.remove(CACHE_INDEX_KEY).await {
                warn!(error = %e, "failed to drop cache index");
            }
        }

        info!(cleared, "cleared all cache entries");
        cleared
    }

    async fn cache_keys(&self) -> Vec<String> {
        if self.store.supports_key_listing() {
            match self.store.list_keys(CACHE_PREFIX).await {
                Ok(keys) => keys,
                Err(e) => {
                    warn!(error = %e, "failed to list cache keys");
                    Vec::new()
                }
            }
        } else {
            self.read_index().await
        }
    }

    async fn remove_key(&self, storage_key: &str) -> bool {
        match self.store.remove(storage_key).await {
            Ok(()) => {
                self.index_remove(storage_key).await;
                true
            }
            Err(e) => {
                warn!(key = %storage_key, error = %e, "failed to remove cache entry");
                false
            }
        }
    }

    async fn read_index(&self) -> Vec<String> {
        match self.store.get(CACHE_INDEX_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "cache index is corrupt, starting over");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read cache index");
                Vec::new()
            }
        }
    }

    async fn write_index(&self, keys: &[String]) {
        let result = match serde_json::to_string(keys) {
            Ok(raw) => self.store.set(CACHE_INDEX_KEY, &raw).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to write cache index");
        }
    }

    async fn index_insert(&self, storage_key: &str) {
        if self.store.supports_key_listing() {
            return;
        }
        let _guard = self.index_lock.lock().await;
        let mut keys = self.read_index().await;
        if !keys.iter().any(|k| k == storage_key) {
            keys.push(storage_key.to_string());
            self.write_index(&keys).await;
        }
    }

    async fn index_remove(&self, storage_key: &str) {
        if self.store.supports_key_listing() {
            return;
        }
        let _guard = self.index_lock.lock().await;
        let mut keys = self.read_index().await;
        let before = keys.len();
        keys.retain(|k| k != storage_key);
        if keys.len() != before {
            self.write_index(&keys).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::errors::{StoreError, StoreResult};
    use crate::domain::ports::ManualClock;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn setup(store: Arc<dyn DurableStore>) -> (CacheStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(t0()));
        let cache = CacheStore::new(store, clock.clone(), CacheConfig::default());
        (cache, clock)
    }

    /// A store whose every operation fails.
    struct BrokenStore;

    #[async_trait]
    impl DurableStore for BrokenStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }
        async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }
        async fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }
    }

    #[test]
    fn test_cache_key_normalization_and_bounds() {
        assert_eq!(
            CacheKey::search("  Bohemian Rhapsody ", 15),
            CacheKey::search("bohemian rhapsody", 15)
        );
        assert_ne!(CacheKey::search("abc", 5), CacheKey::search("abc", 20));
        assert_ne!(CacheKey::search("abc", 5), CacheKey::trending("abc", 5));
        assert_eq!(CacheKey::search("ABC", 5).as_str(), "search_abc_5");
        assert_eq!(
            CacheKey::trending("karaoke instrumental", 30).storage_key(),
            "youtube_cache:trending_karaoke instrumental_30"
        );
    }

    #[tokio::test]
    async fn test_round_trip_within_ttl() {
        let (cache, clock) = setup(Arc::new(MemoryStore::new()));
        let key = CacheKey::search("abc", 5);

        cache.set(&key, &vec![1, 2, 3], Duration::minutes(1)).await;
        clock.advance(Duration::seconds(59));

        assert_eq!(cache.get::<Vec<i32>>(&key).await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_expired_read_removes_key() {
        let store = Arc::new(MemoryStore::new());
        let (cache, clock) = setup(store.clone());
        let key = CacheKey::search("abc", 5);

        cache.set(&key, "x", Duration::milliseconds(100)).await;
        clock.advance(Duration::milliseconds(101));

        assert_eq!(cache.get::<String>(&key).await, None);
        assert_eq!(store.get(&key.storage_key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_miss_and_removed() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _clock) = setup(store.clone());
        let key = CacheKey::search("abc", 5);
        store.set(&key.storage_key(), "{not json").await.unwrap();

        assert_eq!(cache.get::<String>(&key).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_default_and_trending_tiers() {
        let (cache, clock) = setup(Arc::new(MemoryStore::new()));
        let search = CacheKey::search("abc", 5);
        let trending = CacheKey::trending("karaoke", 30);

        cache.set_default(&search, "s").await;
        cache.set_trending(&trending, "t").await;
        clock.advance(Duration::minutes(31));

        assert_eq!(cache.get::<String>(&search).await, None);
        assert_eq!(cache.get::<String>(&trending).await.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn test_clear_expired_counts_expired_and_corrupt() {
        let store = Arc::new(MemoryStore::new());
        let (cache, clock) = setup(store.clone());

        cache.set(&CacheKey::search("old", 5), "a", Duration::minutes(1)).await;
        cache.set(&CacheKey::search("new", 5), "b", Duration::hours(1)).await;
        store.set("youtube_cache:garbage", "???").await.unwrap();
        store.set("youtube_api_usage", "{}").await.unwrap();

        clock.advance(Duration::minutes(2));
        assert_eq!(cache.clear_expired().await, 2);
        assert_eq!(cache.get::<String>(&CacheKey::search("new", 5)).await.as_deref(), Some("b"));
        // Keys outside the namespace are untouched
        assert!(store.get("youtube_api_usage").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_all_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _clock) = setup(store.clone());
        cache.set_default(&CacheKey::search("a", 5), "a").await;
        cache.set_default(&CacheKey::search("b", 5), "b").await;

        assert_eq!(cache.clear_all().await, 2);
        assert_eq!(cache.clear_all().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_side_index_without_key_listing() {
        let store = Arc::new(MemoryStore::without_key_listing());
        let (cache, clock) = setup(store.clone());

        cache.set(&CacheKey::search("old", 5), "a", Duration::minutes(1)).await;
        cache.set(&CacheKey::search("new", 5), "b", Duration::hours(1)).await;
        cache.set(&CacheKey::search("new", 5), "c", Duration::hours(1)).await;

        let index: Vec<String> =
            serde_json::from_str(&store.get(CACHE_INDEX_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(index.len(), 2);

        clock.advance(Duration::minutes(2));
        assert_eq!(cache.clear_expired().await, 1);
        assert_eq!(cache.clear_all().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_broken_store_degrades_silently() {
        let (cache, _clock) = setup(Arc::new(BrokenStore));
        let key = CacheKey::search("abc", 5);

        cache.set_default(&key, "x").await;
        assert_eq!(cache.get::<String>(&key).await, None);
        assert_eq!(cache.clear_expired().await, 0);
        assert_eq!(cache.clear_all().await, 0);
    }
}
