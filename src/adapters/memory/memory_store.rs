//! In-process DurableStore backed by a map.
//!
//! Nothing survives a restart. Useful for tests and for running the CLI
//! without touching disk.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ports::DurableStore;

#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    key_listing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            key_listing: true,
        }
    }

    /// A store that refuses `list_keys`, like a plain browser-style key-value API.
    pub fn without_key_listing() -> Self {
        Self {
            key_listing: false,
            ..Self::new()
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn supports_key_listing(&self) -> bool {
        self.key_listing
    }

    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        if !self.key_listing {
            return Err(StoreError::Unsupported("list_keys"));
        }
        Ok(self
            .entries
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
