use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::errors::ProviderResult;
use crate::domain::models::ProviderVideo;

/// Upstream video search API.
///
/// Every call made through this trait costs upstream quota; the query
/// service only invokes it after the admission gate has allowed the request
/// and the usage has been recorded.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Whether credentials are present. Unconfigured providers are never called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Search embeddable videos matching `query`, returning at most `max_results`.
    async fn search_videos(&self, query: &str, max_results: u32)
        -> ProviderResult<Vec<ProviderVideo>>;

    /// Look up ISO 8601 durations for the given video ids.
    ///
    /// Ids the provider does not know about are simply missing from the map.
    async fn video_durations(&self, ids: &[String]) -> ProviderResult<HashMap<String, String>>;
}
