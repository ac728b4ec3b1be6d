//! vidgate: a quota-aware cache and admission gate for the YouTube Data API.
//!
//! Callers ask for search results or a trending list through
//! [`QueryService`]. Each request is answered from the cache when possible;
//! otherwise the admission gate decides whether a live request fits under
//! the daily quota and the inter-request cooldown, usage is recorded, and
//! the result is written through to the cache. Denials and failures come
//! back as empty results so the caller can fall back to sample data.
//!
//! Layout:
//! - `domain`: models, port traits and errors
//! - `services`: cache store, usage tracker, admission gate, query facade
//! - `adapters`: SQLite and in-memory durable stores
//! - `infrastructure`: configuration, logging, YouTube client
//! - `cli`: the `vidgate` command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{ProviderError, StoreError};
pub use domain::models::{
    AdmissionDecision, CacheEntry, Config, Denial, Item, ProviderVideo, UsageReport, UsageStats,
    DEFAULT_CACHE_TTL_MS, MAX_DAILY_REQUESTS, REQUEST_COOLDOWN_MS, TRENDING_CACHE_TTL_MS,
};
pub use domain::ports::{Clock, DurableStore, ManualClock, NullStore, SystemClock, VideoProvider};
pub use services::{CacheKey, CacheStore, QueryOutcome, QueryService, UsageTracker};
