//! Durable store selection from configuration.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::adapters::sqlite::{open_store, PoolConfig};
use crate::adapters::MemoryStore;
use crate::domain::models::{StorageBackend, StorageConfig};
use crate::domain::ports::{DurableStore, NullStore};

/// Build the store named by `config`.
///
/// A SQLite store that cannot be opened degrades to [`NullStore`]: the
/// query core keeps working, it just forgets everything on exit.
pub async fn open_durable_store(config: &StorageConfig) -> Arc<dyn DurableStore> {
    match config.backend {
        StorageBackend::Sqlite => {
            let path = Path::new(&config.path);
            match open_store(path, &PoolConfig::from(config)).await {
                Ok(store) => {
                    debug!(path = %path.display(), "opened sqlite store");
                    Arc::new(store)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "sqlite store unavailable, persistence disabled");
                    Arc::new(NullStore::new())
                }
            }
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::None => Arc::new(NullStore::new()),
    }
}
