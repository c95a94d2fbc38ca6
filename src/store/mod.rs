//! Persisted key-value stores backing the catalog cache
//!
//! Values are JSON documents addressed by flat string keys such as
//! `avatars_cache_platformA`. Typed access lives in the cache layer; the
//! store only moves `serde_json::Value`s around so it stays object-safe.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AvakitResult;
use async_trait::async_trait;

/// Abstract persisted key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get_item(&self, key: &str) -> AvakitResult<Option<serde_json::Value>>;

    /// Write `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: serde_json::Value) -> AvakitResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn remove_item(&self, key: &str) -> AvakitResult<()>;
}
