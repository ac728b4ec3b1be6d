//! Null durable store implementation.
//!
//! Used when no persistence mechanism is available but the services still
//! need a `DurableStore`. Every read is a miss and every write is dropped.

use async_trait::async_trait;

use super::DurableStore;
use crate::domain::errors::StoreResult;

/// A no-op store that persists nothing.
#[derive(Debug, Clone, Default)]
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DurableStore for NullStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> StoreResult<()> {
        Ok(())
    }

    fn supports_key_listing(&self) -> bool {
        true
    }

    async fn list_keys(&self, _prefix: &str) -> StoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}
