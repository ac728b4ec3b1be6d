//! Cache and usage persistence across restarts on a real database file

mod common;

use chrono::Duration;
use common::{search_response, service, t0, temp_dir, videos_response};
use std::sync::Arc;
use vidgate::domain::models::{StorageBackend, StorageConfig};
use vidgate::infrastructure::open_durable_store;
use vidgate::services::{CACHE_PREFIX, USAGE_KEY};
use vidgate::{Config, ManualClock, QueryOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn storage(dir: &tempfile::TempDir) -> StorageConfig {
    StorageConfig {
        backend: StorageBackend::Sqlite,
        path: dir.path().join("vidgate.db").to_string_lossy().into_owned(),
        ..StorageConfig::default()
    }
}

#[tokio::test]
async fn test_cache_and_usage_survive_restart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_response(&[("id1", "Adele - Hello")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_response(&["id1"], "PT4M")))
        .mount(&server)
        .await;

    let dir = temp_dir();
    let config = Config::default();
    let clock = Arc::new(ManualClock::new(t0()));

    {
        let store = open_durable_store(&storage(&dir)).await;
        let svc = service(store, &server, clock.clone(), &config);
        assert!(matches!(svc.search_with_outcome("hello adele", 5).await, QueryOutcome::Fetched(_)));
    }

    clock.advance(Duration::minutes(5));
    let store = open_durable_store(&storage(&dir)).await;
    assert!(store.get(USAGE_KEY).await.unwrap().is_some());
    let keys = store.list_keys(CACHE_PREFIX).await.unwrap();
    assert_eq!(keys, vec![format!("{CACHE_PREFIX}search_hello adele_5")]);

    let svc = service(store, &server, clock, &config);
    let outcome = svc.search_with_outcome("Hello Adele", 5).await;
    let QueryOutcome::Cached(items) = outcome else {
        panic!("expected cache hit after restart");
    };
    assert_eq!(items[0].artist, "Adele");
    assert_eq!(svc.get_usage().await.requests_today, 1);
}

#[tokio::test]
async fn test_usage_rolls_over_after_local_midnight() {
    let dir = temp_dir();
    let server = MockServer::start().await;
    let clock = Arc::new(ManualClock::new(t0()));

    let store = open_durable_store(&storage(&dir)).await;
    let tracker = vidgate::UsageTracker::new(store.clone(), clock.clone());
    tracker.record_request().await;
    tracker.record_request().await;
    assert_eq!(tracker.get_stats().await.requests_today, 2);

    clock.advance(Duration::days(1) + Duration::hours(1));
    let svc = service(store, &server, clock, &Config::default());
    let usage = svc.get_usage().await;
    assert_eq!(usage.requests_today, 0);
    assert!(usage.last_request_time.is_none());
}

#[tokio::test]
async fn test_clear_all_removes_only_cache_entries() {
    let dir = temp_dir();
    let server = MockServer::start().await;
    let clock = Arc::new(ManualClock::new(t0()));
    let store = open_durable_store(&storage(&dir)).await;

    store.set(USAGE_KEY, "{}").await.unwrap();
    store.set(&format!("{CACHE_PREFIX}search_a_5"), "{}").await.unwrap();
    store.set(&format!("{CACHE_PREFIX}search_b_5"), "{}").await.unwrap();
    store.set("unrelated", "x").await.unwrap();

    let svc = service(store.clone(), &server, clock, &Config::default());
    assert_eq!(svc.clear_all_cache().await, 2);

    assert!(store.list_keys(CACHE_PREFIX).await.unwrap().is_empty());
    assert!(store.get(USAGE_KEY).await.unwrap().is_some());
    assert!(store.get("unrelated").await.unwrap().is_some());
}
