//! Caller-facing query facade.
//!
//! Every lookup goes cache first, then through the admission gate, and only
//! then to the provider. Usage is recorded before the network round trip, so
//! a failed fetch still counts against the quota. Nothing here returns an
//! error: denials and failures come back as a [`QueryOutcome`] with no
//! items, and the caller falls back to its own sample data.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::admission_gate::AdmissionGate;
use super::cache_store::{normalize_query, CacheKey, CacheStore};
use super::normalize::to_item;
use super::usage_tracker::UsageTracker;
use crate::domain::errors::{ProviderError, ProviderResult};
use crate::domain::models::{
    AdmissionDecision, Config, Denial, Item, QuotaConfig, SearchConfig, UsageReport, UsageStats,
};
use crate::domain::ports::{Clock, DurableStore, VideoProvider};

/// How a query was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Served from the cache without touching the provider
    Cached(Vec<Item>),
    /// Fetched live and written through to the cache
    Fetched(Vec<Item>),
    /// The admission gate refused a live request
    Denied(AdmissionDecision),
    /// The live request failed after its usage was recorded
    Failed(String),
    /// A newer search started before this one finished
    Superseded,
    /// The query is shorter than the configured minimum
    TooShort,
    /// The provider has no usable credentials
    Unconfigured,
}

impl QueryOutcome {
    pub fn items(&self) -> &[Item] {
        match self {
            Self::Cached(items) | Self::Fetched(items) => items,
            _ => &[],
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::Cached(items) | Self::Fetched(items) => items,
            _ => Vec::new(),
        }
    }

    /// Short machine-readable label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cached(_) => "cached",
            Self::Fetched(_) => "fetched",
            Self::Denied(_) => "denied",
            Self::Failed(_) => "failed",
            Self::Superseded => "superseded",
            Self::TooShort => "too_short",
            Self::Unconfigured => "unconfigured",
        }
    }

    /// Human-readable explanation for an empty answer.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Cached(_) | Self::Fetched(_) => None,
            Self::Denied(decision) => decision.reason.clone(),
            Self::Failed(reason) => Some(reason.clone()),
            Self::Superseded => Some("Superseded by a newer search".to_string()),
            Self::TooShort => Some("Query is too short".to_string()),
            Self::Unconfigured => Some("Video provider is not configured".to_string()),
        }
    }
}

pub struct QueryService {
    cache: CacheStore,
    tracker: Arc<UsageTracker>,
    gate: AdmissionGate,
    provider: Arc<dyn VideoProvider>,
    clock: Arc<dyn Clock>,
    search: SearchConfig,
    quota: QuotaConfig,
    /// Held across the gate check and the usage record.
    admission_lock: Mutex<()>,
    latest_key: std::sync::Mutex<Option<CacheKey>>,
}

impl QueryService {
    pub fn new(
        store: Arc<dyn DurableStore>,
        provider: Arc<dyn VideoProvider>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        let tracker = Arc::new(UsageTracker::new(store.clone(), clock.clone()));
        Self {
            cache: CacheStore::new(store, clock.clone(), config.cache.clone()),
            gate: AdmissionGate::new(tracker.clone(), clock.clone(), config.quota.clone()),
            tracker,
            provider,
            clock,
            search: config.search.clone(),
            quota: config.quota.clone(),
            admission_lock: Mutex::new(()),
            latest_key: std::sync::Mutex::new(None),
        }
    }

    /// Search results for `query`, empty when the query could not be answered.
    pub async fn search(&self, query: &str, max_results: u32) -> Vec<Item> {
        self.search_with_outcome(query, max_results).await.into_items()
    }

    /// Like [`search`](Self::search), but reports how the query was answered.
    ///
    /// Each call becomes the latest requested search. A live result that
    /// finishes after a newer search started is cached but reported as
    /// `Superseded`.
    pub async fn search_with_outcome(&self, query: &str, max_results: u32) -> QueryOutcome {
        let key = CacheKey::search(query, max_results);
        self.set_latest(&key);

        let outcome = self.lookup(query, max_results, key.clone()).await;
        match outcome {
            QueryOutcome::Fetched(_) if !self.is_latest(&key) => {
                debug!(key = %key, "discarding superseded result");
                QueryOutcome::Superseded
            }
            other => other,
        }
    }

    /// Trending items, merged from the configured trending queries.
    pub async fn trending(&self, max_results: u32) -> Vec<Item> {
        self.trending_with_outcome(max_results).await.into_items()
    }

    pub async fn trending_with_outcome(&self, max_results: u32) -> QueryOutcome {
        if !self.provider.is_configured() {
            warn!("video provider not configured, skipping trending lookup");
            return QueryOutcome::Unconfigured;
        }

        if max_results == 0 {
            return QueryOutcome::Fetched(Vec::new());
        }

        let key = CacheKey::trending(&self.search.trending_term, max_results);
        if let Some(items) = self.cache.get::<Vec<Item>>(&key).await {
            return QueryOutcome::Cached(items);
        }

        let queries = &self.search.trending_queries;
        if queries.is_empty() {
            return QueryOutcome::Failed("No trending queries configured".to_string());
        }
        let per_query = max_results
            .div_ceil(u32::try_from(queries.len()).unwrap_or(u32::MAX))
            .max(1);

        // A wait longer than one cooldown means the stored timestamp is ahead of the clock
        let max_wait = std::time::Duration::from_millis(self.quota.request_cooldown_ms);
        let mut collected = Vec::new();
        let mut last_denial = None;
        let mut last_failure = None;

        for query in queries {
            let mut outcome = self.lookup(query, per_query, CacheKey::search(query, per_query)).await;

            let cooldown = match &outcome {
                QueryOutcome::Denied(decision) if decision.denial == Some(Denial::Cooldown) => {
                    Some(decision.wait_time().min(max_wait))
                }
                _ => None,
            };
            if let Some(wait) = cooldown {
                debug!(query = %query, wait = ?wait, "waiting out cooldown");
                tokio::time::sleep(wait).await;
                outcome = self.lookup(query, per_query, CacheKey::search(query, per_query)).await;
            }

            match outcome {
                QueryOutcome::Cached(items) | QueryOutcome::Fetched(items) => collected.extend(items),
                QueryOutcome::Denied(decision) => {
                    let quota_spent = decision.denial == Some(Denial::DailyQuota);
                    last_denial = Some(decision);
                    if quota_spent {
                        break;
                    }
                }
                QueryOutcome::Failed(reason) => last_failure = Some(reason),
                QueryOutcome::Superseded | QueryOutcome::TooShort | QueryOutcome::Unconfigured => {}
            }
        }

        let mut seen = HashSet::new();
        collected.retain(|item| seen.insert(item.source_id.clone()));
        collected.truncate(usize::try_from(max_results).unwrap_or(usize::MAX));

        if !collected.is_empty() {
            self.cache.set_trending(&key, &collected).await;
            info!(count = collected.len(), "cached trending list");
            return QueryOutcome::Fetched(collected);
        }

        match (last_denial, last_failure) {
            (Some(decision), _) => QueryOutcome::Denied(decision),
            (None, Some(reason)) => QueryOutcome::Failed(reason),
            (None, None) => QueryOutcome::Fetched(Vec::new()),
        }
    }

    pub async fn get_usage(&self) -> UsageStats {
        self.tracker.get_stats().await
    }

    pub async fn usage_report(&self) -> UsageReport {
        self.get_usage()
            .await
            .report(self.quota.max_daily_requests, self.clock.now())
    }

    /// Whether a live request would be admitted right now.
    pub async fn can_make_request(&self) -> AdmissionDecision {
        self.gate.can_make_request().await
    }

    pub async fn clear_expired_cache(&self) -> usize {
        self.cache.clear_expired().await
    }

    pub async fn clear_all_cache(&self) -> usize {
        self.cache.clear_all().await
    }

    /// Cache, gate, record, fetch, write through.
    async fn lookup(&self, query: &str, max_results: u32, key: CacheKey) -> QueryOutcome {
        if normalize_query(query).chars().count() < self.search.min_query_length {
            return QueryOutcome::TooShort;
        }
        if !self.provider.is_configured() {
            warn!("video provider not configured, skipping live search");
            return QueryOutcome::Unconfigured;
        }
        if let Some(items) = self.cache.get::<Vec<Item>>(&key).await {
            return QueryOutcome::Cached(items);
        }

        {
            let _guard = self.admission_lock.lock().await;
            let decision = self.gate.can_make_request().await;
            if !decision.allowed {
                info!(
                    key = %key,
                    denial = ?decision.denial,
                    reason = decision.reason.as_deref().unwrap_or_default(),
                    "live request denied"
                );
                return QueryOutcome::Denied(decision);
            }
            self.tracker.record_request().await;
        }

        let timeout = self.search.fetch_timeout();
        let result = match tokio::time::timeout(timeout, self.fetch(query, max_results)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        };

        match result {
            Ok(items) => {
                info!(key = %key, count = items.len(), "fetched live results");
                self.cache.set_default(&key, &items).await;
                QueryOutcome::Fetched(items)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "live search failed");
                QueryOutcome::Failed(e.to_string())
            }
        }
    }

    async fn fetch(&self, query: &str, max_results: u32) -> ProviderResult<Vec<Item>> {
        let videos = self.provider.search_videos(query.trim(), max_results).await?;

        let durations = if self.search.fetch_details && !videos.is_empty() {
            let ids: Vec<String> = videos.iter().map(|v| v.id.clone()).collect();
            self.provider.video_durations(&ids).await?
        } else {
            Default::default()
        };

        Ok(videos
            .iter()
            .map(|video| to_item(video, durations.get(&video.id).cloned()))
            .collect())
    }

    fn set_latest(&self, key: &CacheKey) {
        *self
            .latest_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(key.clone());
    }

    fn is_latest(&self, key: &CacheKey) -> bool {
        self.latest_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            == Some(key)
    }
}
