use crate::fixtures::{create_test_app_state, sample_data};
use agency_core::CacheStatus;
use agency_web::handlers::{cache_status, get_stats, invalidate_cache, list_artists};
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn status_reports_a_valid_list_after_load() {
    let state = create_test_app_state(Arc::new(sample_data()), None).await;
    state.feed.settled().await;

    let response = cache_status(State(state)).await.0;

    assert_eq!(response.status, CacheStatus::Valid);
    assert_eq!(response.entries, 1);
    assert!(response.can_retry);
    assert!(response.last_error.is_none());
}

#[tokio::test]
async fn invalidate_forces_the_next_list_to_hit_the_backend() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;

    let status = invalidate_cache(State(state.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        cache_status(State(state.clone())).await.0.status,
        CacheStatus::None
    );

    list_artists(State(state)).await.unwrap();
    assert_eq!(data.artist_hits(), 2);
}

#[tokio::test]
async fn stats_count_cached_artists_by_type() {
    let state = create_test_app_state(Arc::new(sample_data()), None).await;
    state.feed.settled().await;

    let stats = get_stats(State(state)).await.0;

    assert_eq!(stats.total_artists, 2);
    assert_eq!(stats.by_type.get("choreographer"), Some(&1));
    assert_eq!(stats.by_type.get("dancer"), Some(&1));
    assert_eq!(stats.cache_status, CacheStatus::Valid);
}

#[tokio::test]
async fn stats_do_not_fetch_when_cache_is_empty() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;
    state.artists.invalidate();

    let stats = get_stats(State(state)).await.0;

    assert_eq!(stats.total_artists, 0);
    assert!(stats.by_type.is_empty());
    assert_eq!(data.artist_hits(), 1);
}
