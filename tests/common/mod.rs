//! Common test utilities for integration tests
//!
//! Shared fixtures: a wiremock-backed YouTube client, query services wired
//! over in-memory or on-disk stores, and canned API responses.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;
use vidgate::domain::models::{Config, ProviderConfig};
use vidgate::infrastructure::youtube::{YouTubeClient, YouTubeClientConfig};
use vidgate::{DurableStore, ManualClock, QueryService};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "AIzaSyTestKey1234567890";

/// Fixed starting instant, far from any DST change
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Initialize a tracing subscriber that writes through the test harness
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn youtube_client(server: &MockServer, timeout_secs: u64) -> YouTubeClient {
    YouTubeClient::new(YouTubeClientConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: server.uri(),
        timeout_secs,
        ..YouTubeClientConfig::from(&ProviderConfig::default())
    })
    .expect("client should build")
}

pub fn service(
    store: Arc<dyn DurableStore>,
    server: &MockServer,
    clock: Arc<ManualClock>,
    config: &Config,
) -> QueryService {
    QueryService::new(
        store,
        Arc::new(youtube_client(server, config.provider.timeout_secs)),
        clock,
        config,
    )
}

/// `GET /search` body with one video per `(id, title)` pair
pub fn search_response(videos: &[(&str, &str)]) -> serde_json::Value {
    let items: Vec<_> = videos
        .iter()
        .map(|(id, title)| {
            serde_json::json!({
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": id},
                "snippet": {
                    "title": title,
                    "channelTitle": "Sing King",
                    "thumbnails": {
                        "default": {"url": format!("https://i.ytimg.com/vi/{id}/default.jpg")},
                        "high": {"url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")}
                    }
                }
            })
        })
        .collect();
    serde_json::json!({"kind": "youtube#searchListResponse", "items": items})
}

/// `GET /videos` body giving every id the same duration
pub fn videos_response(ids: &[&str], duration: &str) -> serde_json::Value {
    let items: Vec<_> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "contentDetails": {"duration": duration}}))
        .collect();
    serde_json::json!({"kind": "youtube#videoListResponse", "items": items})
}
