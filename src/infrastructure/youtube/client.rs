use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::YouTubeApiError;
use super::types::{SearchListResponse, SearchResult, VideoListResponse};
use crate::domain::errors::ProviderResult;
use crate::domain::models::{ProviderConfig, ProviderVideo};
use crate::domain::ports::VideoProvider;

/// Placeholder shipped in sample configuration files
pub const API_KEY_PLACEHOLDER: &str = "YOUR_YOUTUBE_API_KEY_HERE";

/// The API caps `maxResults` at 50
const MAX_RESULTS_LIMIT: u32 = 50;

/// Configuration for the YouTube HTTP client
#[derive(Clone)]
pub struct YouTubeClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Appended to every search query
    pub query_suffix: String,
    pub category_id: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for YouTubeClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("query_suffix", &self.query_suffix)
            .field("category_id", &self.category_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl From<&ProviderConfig> for YouTubeClientConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            query_suffix: config.query_suffix.clone(),
            category_id: config.category_id.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for the YouTube Data API v3
///
/// Makes exactly one HTTP request per call. Admission and retries are the
/// caller's business; every request here spends quota.
pub struct YouTubeClient {
    http_client: ReqwestClient,
    config: YouTubeClientConfig,
}

impl YouTubeClient {
    pub fn new(config: YouTubeClientConfig) -> Result<Self, YouTubeApiError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Whether `api_key` looks usable: present, longer than 10 characters and
    /// not the sample placeholder.
    pub fn key_is_usable(api_key: Option<&str>) -> bool {
        api_key.is_some_and(|key| {
            let key = key.trim();
            key.len() > 10 && key != API_KEY_PLACEHOLDER
        })
    }

    /// The query actually sent upstream.
    pub fn shaped_query(&self, query: &str) -> String {
        let query = query.trim();
        let suffix = self.config.query_suffix.trim();
        if suffix.is_empty() {
            query.to_string()
        } else {
            format!("{query} {suffix}")
        }
    }

    fn api_key(&self) -> Result<&str, YouTubeApiError> {
        match self.config.api_key.as_deref() {
            Some(key) if Self::key_is_usable(Some(key)) => Ok(key.trim()),
            _ => Err(YouTubeApiError::MissingApiKey),
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs.max(1))
    }

    /// `GET /search` for embeddable videos.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, YouTubeApiError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", self.shaped_query(query)),
            ("type", "video".to_string()),
            ("maxResults", max_results.clamp(1, MAX_RESULTS_LIMIT).to_string()),
            ("videoEmbeddable", "true".to_string()),
        ];
        if let Some(category) = self.config.category_id.as_ref().filter(|c| !c.is_empty()) {
            params.push(("videoCategoryId", category.clone()));
        }
        self.get_json("search", &params).await
    }

    /// `GET /videos` with content details for the given ids.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn videos(&self, ids: &[String]) -> Result<VideoListResponse, YouTubeApiError> {
        let params = [
            ("part", "contentDetails,snippet".to_string()),
            ("id", ids.join(",")),
        ];
        self.get_json("videos", &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, YouTubeApiError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "YouTube API response");

        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        if !status.is_success() {
            let error = YouTubeApiError::from_status(status, body);
            warn!(endpoint, error = %error, "YouTube API request rejected");
            return Err(error);
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> YouTubeApiError {
        if err.is_timeout() {
            YouTubeApiError::Timeout(self.timeout())
        } else {
            YouTubeApiError::NetworkError(err.without_url())
        }
    }
}

#[async_trait]
impl VideoProvider for YouTubeClient {
    fn is_configured(&self) -> bool {
        Self::key_is_usable(self.config.api_key.as_deref())
    }

    async fn search_videos(&self, query: &str, max_results: u32) -> ProviderResult<Vec<ProviderVideo>> {
        let response = self.search(query, max_results).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(SearchResult::into_provider_video)
            .collect())
    }

    async fn video_durations(&self, ids: &[String]) -> ProviderResult<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let response = self.videos(ids).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|video| {
                let duration = video.content_details?.duration?;
                Some((video.id, duration))
            })
            .collect())
    }
}
