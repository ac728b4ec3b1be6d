use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Daily cap on live upstream requests (out of the provider's 10,000 unit quota)
pub const MAX_DAILY_REQUESTS: u32 = 800;

/// Minimum spacing between consecutive live requests
pub const REQUEST_COOLDOWN_MS: u64 = 1000;

/// Lifetime of query-specific results (30 minutes)
pub const DEFAULT_CACHE_TTL_MS: u64 = 30 * 60 * 1000;

/// Lifetime of trending results (4 hours)
pub const TRENDING_CACHE_TTL_MS: u64 = 4 * 60 * 60 * 1000;

/// Main configuration structure for vidgate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Admission limits
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Cache lifetimes
    #[serde(default)]
    pub cache: CacheConfig,

    /// Query shaping and trending behavior
    #[serde(default)]
    pub search: SearchConfig,

    /// Video provider connection
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Durable store selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admission limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QuotaConfig {
    /// Maximum live requests per local day
    #[serde(default = "default_max_daily_requests")]
    pub max_daily_requests: u32,

    /// Minimum milliseconds between live requests
    #[serde(default = "default_request_cooldown_ms")]
    pub request_cooldown_ms: u64,
}

const fn default_max_daily_requests() -> u32 {
    MAX_DAILY_REQUESTS
}

const fn default_request_cooldown_ms() -> u64 {
    REQUEST_COOLDOWN_MS
}

impl QuotaConfig {
    pub fn request_cooldown(&self) -> Duration {
        Duration::milliseconds(clamp_millis(self.request_cooldown_ms))
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_daily_requests: default_max_daily_requests(),
            request_cooldown_ms: default_request_cooldown_ms(),
        }
    }
}

/// Cache lifetimes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// TTL for search results in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    pub default_ttl_ms: u64,

    /// TTL for trending results in milliseconds
    #[serde(default = "default_trending_ttl_ms")]
    pub trending_ttl_ms: u64,
}

const fn default_cache_ttl_ms() -> u64 {
    DEFAULT_CACHE_TTL_MS
}

const fn default_trending_ttl_ms() -> u64 {
    TRENDING_CACHE_TTL_MS
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::milliseconds(clamp_millis(self.default_ttl_ms))
    }

    pub fn trending_ttl(&self) -> Duration {
        Duration::milliseconds(clamp_millis(self.trending_ttl_ms))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: default_cache_ttl_ms(),
            trending_ttl_ms: default_trending_ttl_ms(),
        }
    }
}

/// Query shaping and trending behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) never reach the provider
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Result bound used when the caller does not pass one
    #[serde(default = "default_max_results")]
    pub default_max_results: u32,

    /// Result bound for the trending list
    #[serde(default = "default_trending_max_results")]
    pub trending_max_results: u32,

    /// Canonical term the trending cache slot is keyed by
    #[serde(default = "default_trending_term")]
    pub trending_term: String,

    /// Provider queries whose merged results make up the trending list
    #[serde(default = "default_trending_queries")]
    pub trending_queries: Vec<String>,

    /// Upper bound on a single live lookup, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Look up video durations after each search
    #[serde(default = "default_true")]
    pub fetch_details: bool,
}

const fn default_min_query_length() -> usize {
    3
}

const fn default_max_results() -> u32 {
    15
}

const fn default_trending_max_results() -> u32 {
    30
}

fn default_trending_term() -> String {
    "karaoke instrumental".to_string()
}

fn default_trending_queries() -> Vec<String> {
    vec![
        "popular karaoke songs".to_string(),
        "best karaoke hits".to_string(),
        "top karaoke songs".to_string(),
    ]
}

const fn default_fetch_timeout_ms() -> u64 {
    10_000
}

const fn default_true() -> bool {
    true
}

impl SearchConfig {
    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
            default_max_results: default_max_results(),
            trending_max_results: default_trending_max_results(),
            trending_term: default_trending_term(),
            trending_queries: default_trending_queries(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            fetch_details: default_true(),
        }
    }
}

/// Video provider connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// YouTube Data API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the YouTube Data API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Term appended to every live search query
    #[serde(default = "default_query_suffix")]
    pub query_suffix: String,

    /// Video category filter (10 = Music)
    #[serde(default = "default_category_id")]
    pub category_id: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_query_suffix() -> String {
    "karaoke".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_category_id() -> Option<String> {
    Some("10".to_string())
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            query_suffix: default_query_suffix(),
            category_id: default_category_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which durable store backs the cache and usage record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
    None,
}

/// Durable store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".vidgate/vidgate.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation policy for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

fn clamp_millis(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX / 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.quota.max_daily_requests, 800);
        assert_eq!(config.quota.request_cooldown(), Duration::milliseconds(1000));
        assert_eq!(config.cache.default_ttl(), Duration::minutes(30));
        assert_eq!(config.cache.trending_ttl(), Duration::hours(4));
        assert_eq!(config.search.min_query_length, 3);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
quota:
  max_daily_requests: 50
storage:
  backend: memory
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.quota.max_daily_requests, 50);
        assert_eq!(config.quota.request_cooldown_ms, REQUEST_COOLDOWN_MS);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.search.trending_queries.len(), 3);
    }
}
