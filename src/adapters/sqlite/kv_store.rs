//! SQLite adapter for DurableStore.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::StoreResult;
use crate::domain::ports::DurableStore;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DurableStore for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn supports_key_listing(&self) -> bool {
        true
    }

    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        // substr avoids LIKE wildcard escaping for prefixes containing '_' or '%'.
        let keys: Vec<String> = sqlx::query_scalar(
            "SELECT key FROM kv_store WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn store() -> SqliteStore {
        SqliteStore::new(create_migrated_test_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_set_get_overwrite_remove() {
        let store = store().await;
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));

        store.set("a", "2").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));

        store.remove("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);

        // Removing an absent key is fine
        store.remove("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_treats_prefix_literally() {
        let store = store().await;
        store.set("youtube_cache:one", "1").await.unwrap();
        store.set("youtube_cache:two", "2").await.unwrap();
        store.set("youtube_cacheXthree", "3").await.unwrap();
        store.set("youtube_api_usage", "{}").await.unwrap();

        let keys = store.list_keys("youtube_cache:").await.unwrap();
        assert_eq!(keys, vec!["youtube_cache:one", "youtube_cache:two"]);

        let all = store.list_keys("").await.unwrap();
        assert_eq!(all.len(), 4);
    }
}
