use crate::fixtures::{create_test_app_state, sample_data};
use agency_core::NetworkStatus;
use agency_core::error::NETWORK_MESSAGE;
use agency_web::handlers::{get_feed, refresh_feed, report_network};
use agency_web::models::NetworkReport;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

#[tokio::test]
async fn feed_snapshot_lists_loaded_artists() {
    let state = create_test_app_state(Arc::new(sample_data()), None).await;
    state.feed.settled().await;

    let feed = get_feed(State(state)).await.0;

    assert!(!feed.loading);
    assert_eq!(feed.artists.len(), 2);
    assert_eq!(feed.retry_count, 0);
    assert!(feed.error.is_none());
}

#[tokio::test]
async fn refresh_bypasses_a_valid_cache() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;

    let feed = refresh_feed(State(state)).await.0;

    assert_eq!(feed.artists.len(), 2);
    assert_eq!(data.artist_hits(), 2);
}

#[tokio::test]
async fn offline_report_blocks_refresh_until_back_online() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;

    let reported = report_network(State(state.clone()), Json(NetworkReport { online: false }))
        .await
        .0;
    assert_eq!(reported.status, NetworkStatus::Offline);

    let feed = refresh_feed(State(state.clone())).await.0;
    assert_eq!(feed.error.as_deref(), Some(NETWORK_MESSAGE));
    assert_eq!(data.artist_hits(), 1);

    report_network(State(state.clone()), Json(NetworkReport { online: true })).await;
    let mut watch = state.feed.watch();
    watch
        .wait_for(|feed| feed.error.is_none() && !feed.loading)
        .await
        .unwrap();

    assert_eq!(data.artist_hits(), 2);
    assert_eq!(get_feed(State(state)).await.0.artists.len(), 2);
}
