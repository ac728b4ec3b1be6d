//! Domain errors for the vidgate query core.
//!
//! None of these escape `QueryService::search` or `QueryService::trending`;
//! they are recovered by the components and surfaced as typed empty outcomes.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by a `DurableStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Backend(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a `VideoProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Video provider is not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Provider request timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Returns true if the provider rejected the request for quota reasons.
    pub fn is_quota_rejection(&self) -> bool {
        matches!(self, Self::Status { status: 403 | 429, .. })
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_rejection_classification() {
        let forbidden = ProviderError::Status {
            status: 403,
            body: "quotaExceeded".to_string(),
        };
        assert!(forbidden.is_quota_rejection());
        assert!(!ProviderError::Malformed("bad".to_string()).is_quota_rejection());
        assert!(!ProviderError::Timeout(Duration::from_secs(1)).is_quota_rejection());
    }

    #[test]
    fn test_sqlx_pool_errors_map_to_unavailable() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Unavailable(_)));

        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
