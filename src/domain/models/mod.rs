//! Domain models for the vidgate query core.

pub mod admission;
pub mod cache_entry;
pub mod config;
pub mod item;
pub mod usage;

pub use admission::{AdmissionDecision, Denial};
pub use cache_entry::CacheEntry;
pub use config::{
    CacheConfig, Config, LoggingConfig, ProviderConfig, QuotaConfig, SearchConfig, StorageBackend,
    StorageConfig, DEFAULT_CACHE_TTL_MS, MAX_DAILY_REQUESTS, REQUEST_COOLDOWN_MS,
    TRENDING_CACHE_TTL_MS,
};
pub use item::{Item, ProviderVideo};
pub use usage::{next_local_midnight, UsageReport, UsageStats};
