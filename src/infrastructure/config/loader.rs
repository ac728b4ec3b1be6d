use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::{Config, StorageBackend};

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".vidgate";

/// Prefix for environment overrides, nested with `__`
pub const ENV_PREFIX: &str = "VIDGATE_";

/// Conventional variable holding the YouTube Data API key
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_daily_requests: {0}. Must be at least 1")]
    InvalidMaxDailyRequests(u32),

    #[error("Invalid {name}: {value}. Must be positive")]
    InvalidTtl { name: &'static str, value: u64 },

    #[error("trending_ttl_ms ({0}) must not be shorter than default_ttl_ms ({1})")]
    TrendingTtlTooShort(u64, u64),

    #[error("Invalid fetch_timeout_ms: {0}. Must be positive")]
    InvalidFetchTimeout(u64),

    #[error("At least one trending query is required")]
    EmptyTrendingQueries,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .vidgate/config.yaml
    /// 3. .vidgate/local.yaml (optional overrides)
    /// 4. Environment variables (VIDGATE_* prefix)
    ///
    /// `YOUTUBE_API_KEY` fills in the API key when no layer set one.
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same as [`load`](Self::load) with the configuration directory given explicitly.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::finish(figment).context("Failed to extract configuration from figment")
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::finish(figment).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn finish(figment: Figment) -> Result<Config> {
        let mut config: Config = figment.extract()?;
        Self::apply_api_key_fallback(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_api_key_fallback(config: &mut Config) {
        let missing = config
            .provider
            .api_key
            .as_deref()
            .map_or(true, |key| key.trim().is_empty());
        if missing {
            config.provider.api_key = std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.quota.max_daily_requests == 0 {
            return Err(ConfigError::InvalidMaxDailyRequests(0));
        }

        // Cache lifetimes
        if config.cache.default_ttl_ms == 0 {
            return Err(ConfigError::InvalidTtl {
                name: "default_ttl_ms",
                value: 0,
            });
        }
        if config.cache.trending_ttl_ms == 0 {
            return Err(ConfigError::InvalidTtl {
                name: "trending_ttl_ms",
                value: 0,
            });
        }
        if config.cache.trending_ttl_ms < config.cache.default_ttl_ms {
            return Err(ConfigError::TrendingTtlTooShort(
                config.cache.trending_ttl_ms,
                config.cache.default_ttl_ms,
            ));
        }

        // Search behavior
        if config.search.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidFetchTimeout(0));
        }
        if config
            .search
            .trending_queries
            .iter()
            .all(|q| q.trim().is_empty())
        {
            return Err(ConfigError::EmptyTrendingQueries);
        }

        // Storage
        if config.storage.backend == StorageBackend::Sqlite {
            if config.storage.path.trim().is_empty() {
                return Err(ConfigError::EmptyDatabasePath);
            }
            if config.storage.max_connections == 0 {
                return Err(ConfigError::InvalidMaxConnections(0));
            }
        }

        // Logging
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
