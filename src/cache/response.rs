//! TTL and size bounded cache for remote catalog responses

use crate::cache::entry::{cache_key, CacheEntryRef, CacheLookup, ResourceKind};
use crate::config::schema::CacheConfig;
use crate::error::AvakitResult;
use crate::platform::PlatformId;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Stored entry as read back, with the timestamp left unparsed so a
/// corrupt value degrades to "expired" instead of failing the read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry<T> {
    items: Vec<T>,
    #[serde(default)]
    saved_at: Option<serde_json::Value>,
}

/// Catalog cache keyed by (resource kind, platform)
///
/// Expiry is lazy: stale entries stay in the store and are only reported
/// as invalid on read. Writes truncate to the kind's bound and replace the
/// previous entry wholesale.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
    max_avatars: usize,
    max_voices: usize,
}

impl ResponseCache {
    /// Create a cache over `store` with limits from config
    pub fn new(store: Arc<dyn KeyValueStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            ttl: Duration::from_secs(config.ttl_hours.saturating_mul(3600)),
            max_avatars: config.max_avatars,
            max_voices: config.max_voices,
        }
    }

    /// Configured default TTL, in hours
    pub fn ttl_hours(&self) -> u64 {
        self.ttl.as_secs() / 3600
    }

    /// Maximum number of items kept for a resource kind
    pub fn max_items(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Avatars => self.max_avatars,
            ResourceKind::Voices => self.max_voices,
        }
    }

    /// Look up a catalog using the default TTL
    pub async fn get<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        platform: PlatformId,
    ) -> AvakitResult<CacheLookup<T>> {
        self.get_with_ttl(kind, platform, self.ttl).await
    }

    /// Look up a catalog, treating entries older than `ttl` as invalid
    ///
    /// Only store faults are returned as `Err`; callers should treat those
    /// as a miss.
    pub async fn get_with_ttl<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        platform: PlatformId,
        ttl: Duration,
    ) -> AvakitResult<CacheLookup<T>> {
        let key = cache_key(kind, platform);

        let Some(value) = self.store.get_item(&key).await? else {
            debug!("Cache miss for {}", key);
            return Ok(CacheLookup::miss());
        };

        let raw: RawEntry<T> = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                return Ok(CacheLookup::miss());
            }
        };

        let Some(saved_at) = raw.saved_at.as_ref().and_then(parse_timestamp) else {
            debug!("Cache entry {} has no usable timestamp, treating as expired", key);
            return Ok(CacheLookup::expired(None));
        };

        // A timestamp in the future means the clock moved; don't trust it
        let Ok(age) = (Utc::now() - saved_at).to_std() else {
            debug!("Cache entry {} is dated in the future, treating as expired", key);
            return Ok(CacheLookup::expired(None));
        };

        if age > ttl {
            debug!("Cache entry {} expired ({:?} old)", key, age);
            return Ok(CacheLookup::expired(Some(age)));
        }

        debug!("Cache hit for {} ({} items)", key, raw.items.len());
        Ok(CacheLookup::hit(raw.items, age))
    }

    /// Store a catalog snapshot, keeping at most `max_items(kind)` items
    ///
    /// Returns whether the store write succeeded. Failures are logged.
    pub async fn put<T: Serialize>(
        &self,
        kind: ResourceKind,
        platform: PlatformId,
        items: &[T],
    ) -> bool {
        let key = cache_key(kind, platform);
        let kept = &items[..items.len().min(self.max_items(kind))];

        if kept.len() < items.len() {
            debug!(
                "Truncating {} from {} to {} items",
                key,
                items.len(),
                kept.len()
            );
        }

        let entry = CacheEntryRef {
            platform,
            items: kept,
            saved_at: Utc::now(),
        };

        let value = match serde_json::to_value(&entry) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                return false;
            }
        };

        match self.store.set_item(&key, value).await {
            Ok(()) => {
                debug!("Cached {} items under {}", kept.len(), key);
                true
            }
            Err(e) => {
                warn!("Failed to write cache entry {}: {}", key, e);
                false
            }
        }
    }

    /// Remove one catalog. Clearing a missing entry succeeds.
    pub async fn clear(&self, kind: ResourceKind, platform: PlatformId) -> bool {
        let key = cache_key(kind, platform);
        match self.store.remove_item(&key).await {
            Ok(()) => {
                debug!("Cleared {}", key);
                true
            }
            Err(e) => {
                warn!("Failed to clear cache entry {}: {}", key, e);
                false
            }
        }
    }

    /// Remove every catalog for a platform; true only if all removals succeed
    pub async fn clear_all(&self, platform: PlatformId) -> bool {
        let mut ok = true;
        for kind in ResourceKind::ALL {
            ok &= self.clear(kind, platform).await;
        }
        ok
    }
}

fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AvakitError;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;

    fn test_cache(config: CacheConfig) -> (ResponseCache, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = ResponseCache::new(store.clone(), &config);
        (cache, store)
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("avatar-{i}")).collect()
    }

    /// Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get_item(&self, key: &str) -> AvakitResult<Option<serde_json::Value>> {
            Err(AvakitError::store(key, "unavailable"))
        }
        async fn set_item(&self, key: &str, _value: serde_json::Value) -> AvakitResult<()> {
            Err(AvakitError::store(key, "unavailable"))
        }
        async fn remove_item(&self, key: &str) -> AvakitResult<()> {
            Err(AvakitError::store(key, "unavailable"))
        }
    }

    #[tokio::test]
    async fn get_after_put_is_valid() {
        let (cache, _store) = test_cache(CacheConfig::default());
        let items = names(3);

        assert!(cache.put(ResourceKind::Avatars, PlatformId::PlatformA, &items).await);
        let lookup = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformA)
            .await
            .unwrap();

        assert!(lookup.valid);
        assert_eq!(lookup.data, Some(items));
        assert!(lookup.age.is_some());
    }

    #[tokio::test]
    async fn missing_entry_is_invalid_without_age() {
        let (cache, _store) = test_cache(CacheConfig::default());
        let lookup = cache
            .get::<String>(ResourceKind::Voices, PlatformId::PlatformC)
            .await
            .unwrap();
        assert_eq!(lookup, CacheLookup::miss());
    }

    #[tokio::test]
    async fn put_truncates_in_insertion_order() {
        let config = CacheConfig {
            max_avatars: 3,
            ..Default::default()
        };
        let (cache, _store) = test_cache(config);

        assert!(cache.put(ResourceKind::Avatars, PlatformId::PlatformB, &names(5)).await);
        let data = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformB)
            .await
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(data, vec!["avatar-0", "avatar-1", "avatar-2"]);
    }

    #[tokio::test]
    async fn bound_is_per_kind() {
        let config = CacheConfig {
            max_avatars: 1,
            max_voices: 4,
            ..Default::default()
        };
        let (cache, _store) = test_cache(config);

        cache.put(ResourceKind::Voices, PlatformId::PlatformC, &names(6)).await;
        let data = cache
            .get::<String>(ResourceKind::Voices, PlatformId::PlatformC)
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(data.len(), 4);
    }

    #[tokio::test]
    async fn put_replaces_previous_entry() {
        let (cache, _store) = test_cache(CacheConfig::default());

        cache.put(ResourceKind::Avatars, PlatformId::PlatformA, &names(4)).await;
        cache
            .put(ResourceKind::Avatars, PlatformId::PlatformA, &["fresh".to_string()])
            .await;

        let data = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformA)
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(data, vec!["fresh"]);
    }

    #[tokio::test]
    async fn old_entry_is_expired_and_hidden() {
        let (cache, store) = test_cache(CacheConfig::default());
        let saved_at = Utc::now() - chrono::Duration::hours(25);
        store
            .set_item(
                "avatars_cache_platformA",
                json!({"platform": "platformA", "items": ["old"], "savedAt": saved_at.to_rfc3339()}),
            )
            .await
            .unwrap();

        let lookup = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformA)
            .await
            .unwrap();

        assert!(!lookup.valid);
        assert!(lookup.data.is_none());
        assert!(lookup.age.unwrap() > Duration::from_secs(24 * 3600));
        // Lazy expiry: the entry is still in the store
        assert!(store.get_item("avatars_cache_platformA").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn explicit_ttl_overrides_default() {
        let (cache, store) = test_cache(CacheConfig::default());
        let saved_at = Utc::now() - chrono::Duration::hours(2);
        store
            .set_item(
                "voices_cache_platformB",
                json!({"platform": "platformB", "items": [1, 2], "savedAt": saved_at.to_rfc3339()}),
            )
            .await
            .unwrap();

        let short = cache
            .get_with_ttl::<u32>(
                ResourceKind::Voices,
                PlatformId::PlatformB,
                Duration::from_secs(3600),
            )
            .await
            .unwrap();
        assert!(!short.valid);

        let long = cache
            .get::<u32>(ResourceKind::Voices, PlatformId::PlatformB)
            .await
            .unwrap();
        assert_eq!(long.into_data(), Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn malformed_timestamp_is_expired() {
        let (cache, store) = test_cache(CacheConfig::default());
        store
            .set_item(
                "avatars_cache_platformC",
                json!({"platform": "platformC", "items": ["x"], "savedAt": "yesterday-ish"}),
            )
            .await
            .unwrap();

        let lookup = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformC)
            .await
            .unwrap();
        assert!(!lookup.valid);
        assert!(lookup.data.is_none());
    }

    #[tokio::test]
    async fn future_timestamp_is_expired() {
        let (cache, store) = test_cache(CacheConfig::default());
        let saved_at = Utc::now() + chrono::Duration::hours(3);
        store
            .set_item(
                "avatars_cache_platformC",
                json!({"platform": "platformC", "items": ["x"], "savedAt": saved_at.to_rfc3339()}),
            )
            .await
            .unwrap();

        let lookup = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformC)
            .await
            .unwrap();
        assert!(!lookup.valid);
    }

    #[tokio::test]
    async fn undecodable_entry_is_a_miss() {
        let (cache, store) = test_cache(CacheConfig::default());
        store
            .set_item("voices_cache_platformA", json!("garbage"))
            .await
            .unwrap();

        let lookup = cache
            .get::<String>(ResourceKind::Voices, PlatformId::PlatformA)
            .await
            .unwrap();
        assert_eq!(lookup, CacheLookup::miss());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (cache, _store) = test_cache(CacheConfig::default());
        cache.put(ResourceKind::Avatars, PlatformId::PlatformA, &names(2)).await;

        assert!(cache.clear(ResourceKind::Avatars, PlatformId::PlatformA).await);
        assert!(cache.clear(ResourceKind::Avatars, PlatformId::PlatformA).await);

        let lookup = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformA)
            .await
            .unwrap();
        assert!(!lookup.valid);
    }

    #[tokio::test]
    async fn clear_all_only_touches_one_platform() {
        let (cache, store) = test_cache(CacheConfig::default());
        cache.put(ResourceKind::Avatars, PlatformId::PlatformA, &names(1)).await;
        cache.put(ResourceKind::Voices, PlatformId::PlatformA, &names(1)).await;
        cache.put(ResourceKind::Voices, PlatformId::PlatformB, &names(1)).await;

        assert!(cache.clear_all(PlatformId::PlatformA).await);
        assert!(cache.clear_all(PlatformId::PlatformA).await);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn store_faults() {
        let cache = ResponseCache::new(Arc::new(BrokenStore), &CacheConfig::default());

        let err = cache
            .get::<String>(ResourceKind::Avatars, PlatformId::PlatformA)
            .await
            .unwrap_err();
        assert!(err.is_store_fault());

        assert!(!cache.put(ResourceKind::Avatars, PlatformId::PlatformA, &names(1)).await);
        assert!(!cache.clear(ResourceKind::Avatars, PlatformId::PlatformA).await);
        assert!(!cache.clear_all(PlatformId::PlatformA).await);
    }

    #[test]
    fn ttl_hours_reflects_config() {
        let config = CacheConfig {
            ttl_hours: 6,
            ..Default::default()
        };
        let (cache, _store) = test_cache(config);
        assert_eq!(cache.ttl_hours(), 6);
        assert_eq!(cache.max_items(ResourceKind::Avatars), 100);
    }
}
