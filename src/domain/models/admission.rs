use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why the admission gate refused a live request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// The daily request budget is spent
    DailyQuota,
    /// The previous live request was too recent
    Cooldown,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DailyQuota => write!(f, "daily_quota"),
            Self::Cooldown => write!(f, "cooldown"),
        }
    }
}

/// Outcome of an admission check. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<Denial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time_ms: Option<u64>,
}

impl AdmissionDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            denial: None,
            reason: None,
            wait_time_ms: None,
        }
    }

    pub fn deny(denial: Denial, reason: impl Into<String>, wait_time_ms: u64) -> Self {
        Self {
            allowed: false,
            denial: Some(denial),
            reason: Some(reason.into()),
            wait_time_ms: Some(wait_time_ms),
        }
    }

    /// How long the caller should wait before asking again.
    pub fn wait_time(&self) -> Duration {
        Duration::from_millis(self.wait_time_ms.unwrap_or(0))
    }
}
