//! Daily usage counter for live upstream requests.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::UsageStats;
use crate::domain::ports::{Clock, DurableStore};

/// Store key owned by the tracker.
pub const USAGE_KEY: &str = "youtube_api_usage";

pub struct UsageTracker {
    store: Arc<dyn DurableStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl UsageTracker {
    pub fn new(store: Arc<dyn DurableStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Current stats as of now.
    ///
    /// Absent, unreadable or out-of-date records read as fresh stats. Nothing
    /// is written back; the next `record_request` persists the rollover.
    pub async fn get_stats(&self) -> UsageStats {
        let now = self.clock.now();
        match self.load().await {
            Some(stats) if !stats.is_stale(now) => stats,
            Some(_) => {
                debug!("usage record is past its reset time");
                UsageStats::fresh(now)
            }
            None => UsageStats::fresh(now),
        }
    }

    /// Count one live request at the current instant and persist it.
    pub async fn record_request(&self) -> UsageStats {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();

        let mut stats = self.load().await.unwrap_or_else(|| UsageStats::fresh(now));
        if stats.is_stale(now) {
            stats = UsageStats::fresh(now);
        }
        stats.requests_today = stats.requests_today.saturating_add(1);
        stats.last_request_time = Some(now);

        self.save(&stats).await;
        info!(
            requests_today = stats.requests_today,
            reset_at = %stats.daily_reset_time,
            "recorded live request"
        );
        stats
    }

    async fn load(&self) -> Option<UsageStats> {
        let raw = match self.store.get(USAGE_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "usage read failed, assuming fresh stats");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(error = %e, "usage record is corrupt, assuming fresh stats");
                None
            }
        }
    }

    async fn save(&self, stats: &UsageStats) {
        let result = match serde_json::to_string(stats) {
            Ok(raw) => self.store.set(USAGE_KEY, &raw).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to persist usage stats");
        }
    }
}
