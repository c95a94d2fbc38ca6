//! In-process store, used by tests and embedders without a disk

use super::KeyValueStore;
use crate::error::AvakitResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Key-value store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> AvakitResult<Option<serde_json::Value>> {
        Ok(self.items.read().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: serde_json::Value) -> AvakitResult<()> {
        self.items.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AvakitResult<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set_item("k", json!({"a": 1})).await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), Some(json!({"a": 1})));

        store.set_item("k", json!([1, 2])).await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), Some(json!([1, 2])));
        assert_eq!(store.len(), 1);

        store.remove_item("k").await.unwrap();
        store.remove_item("k").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), None);
    }
}
