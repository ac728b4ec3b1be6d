use async_trait::async_trait;

use crate::domain::errors::StoreResult;

/// Persistent string-keyed store shared by the cache and the usage tracker.
///
/// Implementations must survive process restarts where the backend allows
/// it. Callers treat every error as "store unavailable" and degrade to
/// absent / no-op behavior, so implementations should fail fast rather than
/// retry internally.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(value))` if present
    /// * `Ok(None)` if absent
    /// * `Err(StoreError)` if the backend could not be reached
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Whether `list_keys` is supported by this backend.
    fn supports_key_listing(&self) -> bool {
        false
    }

    /// List every key starting with `prefix`.
    ///
    /// Backends that cannot enumerate cheaply keep the default, and callers
    /// fall back to maintaining their own index.
    async fn list_keys(&self, _prefix: &str) -> StoreResult<Vec<String>> {
        Err(crate::domain::errors::StoreError::Unsupported("list_keys"))
    }
}
