use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/artists", get(handlers::list_artists))
        .route("/api/artists/:slug", get(handlers::get_artist))
        .route("/api/feed", get(handlers::get_feed))
        .route("/api/feed/refresh", post(handlers::refresh_feed))
        .route("/api/cache/status", get(handlers::cache_status))
        .route("/api/cache/invalidate", post(handlers::invalidate_cache))
        .route("/api/network", post(handlers::report_network))
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
