use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::domain::errors::ProviderError;
use crate::infrastructure::logging::redact_secrets;

/// Errors that can occur when talking to the YouTube Data API
#[derive(Error, Debug)]
pub enum YouTubeApiError {
    /// No usable API key was configured
    #[error("YouTube API key is not configured")]
    MissingApiKey,

    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Quota exhausted or key rejected (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Too many requests (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from the API (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Unknown or unexpected status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl YouTubeApiError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let body = redact_secrets(&body);
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            s if s.is_server_error() => Self::ServerError(s, body),
            s => Self::UnknownError(s, body),
        }
    }

    /// Returns true if the API refused the request for quota reasons
    pub fn is_quota_exceeded(&self) -> bool {
        match self {
            Self::RateLimitExceeded => true,
            Self::Forbidden(body) => {
                body.contains("quotaExceeded") || body.contains("dailyLimitExceeded")
            }
            _ => false,
        }
    }

    fn status(&self) -> Option<StatusCode> {
        match self {
            Self::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound => Some(StatusCode::NOT_FOUND),
            Self::RateLimitExceeded => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::ServerError(s, _) | Self::UnknownError(s, _) => Some(*s),
            _ => None,
        }
    }
}

impl From<YouTubeApiError> for ProviderError {
    fn from(err: YouTubeApiError) -> Self {
        if let Some(status) = err.status() {
            let body = match err {
                YouTubeApiError::BadRequest(body)
                | YouTubeApiError::Forbidden(body)
                | YouTubeApiError::ServerError(_, body)
                | YouTubeApiError::UnknownError(_, body) => body,
                _ => String::new(),
            };
            return Self::Status {
                status: status.as_u16(),
                body,
            };
        }

        match err {
            YouTubeApiError::MissingApiKey => Self::NotConfigured,
            YouTubeApiError::Timeout(after) => Self::Timeout(after),
            YouTubeApiError::JsonError(e) => Self::Malformed(e.to_string()),
            other => Self::Network(redact_secrets(&other.to_string())),
        }
    }
}
