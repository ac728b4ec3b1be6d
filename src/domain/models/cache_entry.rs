use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped, expiring cache payload.
///
/// Entries are written once on a successful live fetch and never mutated in
/// place. Expiry is checked lazily by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// The cached payload
    pub data: T,

    /// When the entry was written
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub written_at: DateTime<Utc>,

    /// When the entry stops being served
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Create an entry written at `now` that lives for `ttl`.
    ///
    /// A non-positive TTL is clamped to one millisecond so that
    /// `expires_at > written_at` always holds.
    pub fn new(data: T, now: DateTime<Utc>, ttl: Duration) -> Self {
        let ttl = ttl.max(Duration::milliseconds(1));
        Self {
            data,
            written_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the entry may still be served at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        !is_past(self.expires_at, now)
    }

    /// Remaining lifetime, zero once expired.
    pub fn time_to_live(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

/// Envelope used to inspect expiry without knowing the payload type.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CacheEnvelope {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) expires_at: DateTime<Utc>,
}

impl CacheEnvelope {
    /// Whether a sweep at `now` should remove this entry.
    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_past(self.expires_at, now)
    }
}

/// An entry is served up to and including `expires_at`.
fn is_past(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at < now
}
