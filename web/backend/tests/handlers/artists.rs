use crate::fixtures::{BaasData, create_test_app_state, sample_data};
use agency_core::ArtistType;
use agency_core::error::{AUTH_MESSAGE, BACKEND_MESSAGE};
use agency_web::handlers::{get_artist, list_artists};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn list_drops_unnamed_rows_and_resolves_slugs() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;

    let response = list_artists(State(state)).await.unwrap().0;

    assert_eq!(response.count, 2);
    assert_eq!(response.artists[0].id, "u1");
    assert_eq!(response.artists[0].slug, "ria");
    assert_eq!(response.artists[0].artist_type, ArtistType::Choreographer);
    assert_eq!(response.artists[1].slug, "u2");
    assert_eq!(response.artists[1].name_en, "");
}

#[tokio::test]
async fn list_is_served_from_cache_after_first_load() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;
    assert_eq!(data.artist_hits(), 1);

    list_artists(State(state.clone())).await.unwrap();
    list_artists(State(state)).await.unwrap();

    assert_eq!(data.artist_hits(), 1);
}

#[tokio::test]
async fn list_query_uses_backend_filters_and_anon_key() {
    let data = Arc::new(sample_data());
    let state = create_test_app_state(data.clone(), None).await;
    state.feed.settled().await;

    let params = data.artist_params.lock()[0].clone();
    assert_eq!(params["artist_type"], "in.(choreographer,dancer,instructor)");
    assert_eq!(params["order"], "created_at.desc");
    assert_eq!(params["limit"], "20");
    assert!(params["select"].contains("name_ko"));
    assert_eq!(data.auth_headers.lock()[0], "Bearer anon-key");
}

#[tokio::test]
async fn backend_outage_is_reported_as_unavailable() {
    let data = Arc::new(BaasData {
        failure: Some((
            StatusCode::SERVICE_UNAVAILABLE,
            json!({"message": "database is starting up"}),
        )),
        ..sample_data()
    });
    let state = create_test_app_state(data, None).await;
    state.feed.settled().await;

    let error = list_artists(State(state)).await.unwrap_err();

    assert_eq!(error.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error.message, BACKEND_MESSAGE);
}

#[tokio::test]
async fn expired_token_is_reported_as_session_problem() {
    let data = Arc::new(BaasData {
        failure: Some((StatusCode::UNAUTHORIZED, json!({"message": "JWT expired"}))),
        ..sample_data()
    });
    let state = create_test_app_state(data, None).await;
    state.feed.settled().await;

    let error = list_artists(State(state)).await.unwrap_err();

    assert_eq!(error.message, AUTH_MESSAGE);
}

#[tokio::test]
async fn detail_groups_featured_careers() {
    let state = create_test_app_state(Arc::new(sample_data()), None).await;

    let response = get_artist(State(state), Path("ria".to_string()))
        .await
        .unwrap()
        .0;

    assert_eq!(response.id, "u1");
    assert_eq!(response.slug, "ria");
    assert_eq!(response.name_en.as_deref(), Some("Ria"));
    assert_eq!(response.career_count, 4);

    let featured: Vec<&str> = response
        .featured_careers
        .iter()
        .map(|career| career.id.as_str())
        .collect();
    let regular: Vec<&str> = response.careers.iter().map(|career| career.id.as_str()).collect();
    assert_eq!(featured, vec!["c3", "c4"]);
    assert_eq!(regular, vec!["c2", "c1"]);
}

#[tokio::test]
async fn detail_accepts_user_id_without_slug() {
    let state = create_test_app_state(Arc::new(sample_data()), None).await;

    let response = get_artist(State(state), Path("u2".to_string()))
        .await
        .unwrap()
        .0;

    assert_eq!(response.slug, "u2");
    assert_eq!(response.name_en, None);
    assert_eq!(response.profile_image, None);
    assert!(response.featured_careers.is_empty());
    assert_eq!(response.career_count, 0);
}

#[tokio::test]
async fn detail_of_unknown_or_unnamed_artist_is_404() {
    let state = create_test_app_state(Arc::new(sample_data()), None).await;

    for slug in ["nobody", "u3"] {
        let error = get_artist(State(state.clone()), Path(slug.to_string()))
            .await
            .unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND, "for {slug}");
    }
}
