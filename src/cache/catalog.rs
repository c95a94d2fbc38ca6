//! Cache-first catalog loading
//!
//! Ask the cache, fall back to the platform on a miss or expiry, write the
//! fresh catalog back. Cache faults never reach the caller; they only cost
//! a network round trip.

use crate::cache::entry::ResourceKind;
use crate::cache::response::ResponseCache;
use crate::credentials::secrets::SecretStore;
use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches a catalog from the platform itself
#[async_trait]
pub trait CatalogSource<T>: Send + Sync {
    async fn fetch(&self, kind: ResourceKind, platform: PlatformId, key: &str)
        -> AvakitResult<Vec<T>>;
}

/// Catalog loader combining the response cache, the key store and a source
pub struct CatalogService<T> {
    cache: ResponseCache,
    secrets: Arc<dyn SecretStore>,
    source: Arc<dyn CatalogSource<T>>,
}

impl<T> CatalogService<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(
        cache: ResponseCache,
        secrets: Arc<dyn SecretStore>,
        source: Arc<dyn CatalogSource<T>>,
    ) -> Self {
        Self {
            cache,
            secrets,
            source,
        }
    }

    /// Return the cached catalog if fresh, otherwise fetch and cache it
    pub async fn load(&self, kind: ResourceKind, platform: PlatformId) -> AvakitResult<Vec<T>> {
        match self.cache.get::<T>(kind, platform).await {
            Ok(lookup) => {
                if let Some(items) = lookup.into_data() {
                    return Ok(items);
                }
            }
            Err(e) => warn!("Cache read for {} {} failed, fetching: {}", kind, platform, e),
        }

        self.refresh(kind, platform).await
    }

    /// Fetch from the platform and overwrite the cached catalog
    pub async fn refresh(&self, kind: ResourceKind, platform: PlatformId) -> AvakitResult<Vec<T>> {
        let key = self
            .secrets
            .get_key(platform)
            .await?
            .ok_or_else(|| AvakitError::KeyNotConfigured(platform.to_string()))?;

        debug!("Fetching {} from {}", kind, platform);
        let mut items = self.source.fetch(kind, platform, &key).await?;
        items.truncate(self.cache.max_items(kind));

        if !self.cache.put(kind, platform, &items).await {
            warn!("Could not cache {} for {}; continuing uncached", kind, platform);
        }

        Ok(items)
    }
}
