//! Query core services.
//!
//! - `CacheStore`: expiring cache over the durable store
//! - `UsageTracker`: daily request counter
//! - `AdmissionGate`: allow/deny decisions for live requests
//! - `QueryService`: the caller-facing facade tying them together

pub mod admission_gate;
pub mod cache_store;
pub mod normalize;
pub mod query_service;
pub mod usage_tracker;

pub use admission_gate::AdmissionGate;
pub use cache_store::{normalize_query, CacheKey, CacheStore, CACHE_INDEX_KEY, CACHE_PREFIX};
pub use query_service::{QueryOutcome, QueryService};
pub use usage_tracker::{UsageTracker, USAGE_KEY};
