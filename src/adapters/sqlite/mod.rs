//! SQLite adapter backing the durable store.

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use kv_store::SqliteStore;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};

use sqlx::SqlitePool;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// Open the database at `path` and bring its schema up to date.
pub async fn initialize_database(path: &Path, config: &PoolConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(path, config).await?;
    verify_connection(&pool).await?;
    Migrator::new(pool.clone()).run(&all_embedded_migrations()).await?;
    Ok(pool)
}

/// Open a migrated `SqliteStore` at `path`.
pub async fn open_store(path: &Path, config: &PoolConfig) -> Result<SqliteStore, DatabaseError> {
    Ok(SqliteStore::new(initialize_database(path, config).await?))
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    Migrator::new(pool.clone()).run(&all_embedded_migrations()).await?;
    Ok(pool)
}
