//! Allow/deny decisions for live upstream requests.
//!
//! The gate only reads usage. Callers that act on an allow must record the
//! request themselves, under the same lock they checked with.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::usage_tracker::UsageTracker;
use crate::domain::models::{AdmissionDecision, Denial, QuotaConfig, UsageStats};
use crate::domain::ports::Clock;

pub struct AdmissionGate {
    tracker: Arc<UsageTracker>,
    clock: Arc<dyn Clock>,
    config: QuotaConfig,
}

impl AdmissionGate {
    pub fn new(tracker: Arc<UsageTracker>, clock: Arc<dyn Clock>, config: QuotaConfig) -> Self {
        Self {
            tracker,
            clock,
            config,
        }
    }

    pub async fn can_make_request(&self) -> AdmissionDecision {
        let stats = self.tracker.get_stats().await;
        decide(&stats, &self.config, self.clock.now())
    }
}

/// Pure admission rule. The daily limit is checked before the cooldown.
pub fn decide(stats: &UsageStats, config: &QuotaConfig, now: DateTime<Utc>) -> AdmissionDecision {
    if stats.requests_today >= config.max_daily_requests {
        let wait_ms = non_negative_ms((stats.daily_reset_time - now).num_milliseconds());
        let hours_until_reset = wait_ms.div_ceil(60 * 60 * 1000);
        return AdmissionDecision::deny(
            Denial::DailyQuota,
            format!(
                "Daily API limit reached ({} requests). Resets in {hours_until_reset}h",
                config.max_daily_requests
            ),
            wait_ms,
        );
    }

    if let Some(last) = stats.last_request_time {
        let elapsed = now - last;
        let cooldown = config.request_cooldown();
        if elapsed < cooldown {
            let wait_ms = non_negative_ms((cooldown - elapsed).num_milliseconds());
            return AdmissionDecision::deny(
                Denial::Cooldown,
                format!("Request cooldown active. Wait {wait_ms}ms"),
                wait_ms,
            );
        }
    }

    AdmissionDecision::allow()
}

fn non_negative_ms(ms: i64) -> u64 {
    u64::try_from(ms).unwrap_or(0)
}
