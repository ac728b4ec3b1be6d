use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Daily request counter for the upstream API.
///
/// `requests_today` only grows until `daily_reset_time`; crossing it resets
/// the counter and moves the reset time to the following local midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Live requests made since the last reset
    pub requests_today: u32,

    /// When the most recent live request was recorded
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_request_time: Option<DateTime<Utc>>,

    /// When the counter next rolls over
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub daily_reset_time: DateTime<Utc>,
}

impl UsageStats {
    /// Zeroed stats whose reset time is the local midnight following `now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            requests_today: 0,
            last_request_time: None,
            daily_reset_time: next_local_midnight(now),
        }
    }

    /// Whether `now` is past the reset time.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now > self.daily_reset_time
    }

    /// Summarize the stats against a daily limit for display.
    pub fn report(&self, max_daily_requests: u32, now: DateTime<Utc>) -> UsageReport {
        let percentage_used = if max_daily_requests == 0 {
            100
        } else {
            let max = u64::from(max_daily_requests);
            let pct = (u64::from(self.requests_today) * 100 + max / 2) / max;
            u32::try_from(pct).unwrap_or(u32::MAX)
        };

        UsageReport {
            requests_today: self.requests_today,
            remaining_today: max_daily_requests.saturating_sub(self.requests_today),
            max_daily_requests,
            percentage_used,
            resets_in_ms: (self.daily_reset_time - now).num_milliseconds().max(0),
            last_request_time: self.last_request_time,
            daily_reset_time: self.daily_reset_time,
        }
    }
}

/// Read-only usage summary for UI display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub requests_today: u32,
    pub remaining_today: u32,
    pub max_daily_requests: u32,
    pub percentage_used: u32,
    pub resets_in_ms: i64,
    pub last_request_time: Option<DateTime<Utc>>,
    pub daily_reset_time: DateTime<Utc>,
}

/// Local midnight (00:00:00.000) of the day after `now`, as a UTC instant.
pub fn next_local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_date = now.with_timezone(&Local).date_naive();
    let Some(tomorrow) = local_date.succ_opt() else {
        return now + Duration::days(1);
    };
    let midnight = tomorrow.and_time(NaiveTime::MIN);

    // Zones that skip midnight on a DST change start the day at 01:00.
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map_or(now + Duration::days(1), |t| t.with_timezone(&Utc))
}
