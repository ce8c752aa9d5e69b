use crate::artist_details::build_detail_response;
use crate::contact::{InquiryError, InquiryForm};
use crate::models::{
    ArtistDetailResponse, ArtistListResponse, CacheStatusResponse, ContactResponse,
    ErrorResponse, FeedResponse, HealthResponse, NetworkReport, NetworkResponse, StatsResponse,
};
use crate::state::AppState;
use agency_core::{FetchError, NetworkStatus, SIMPLE_ARTISTS_KEY};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Error body plus status, as returned by the JSON handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<FetchError> for ApiError {
    fn from(error: FetchError) -> Self {
        let status = match error {
            FetchError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            message: error.user_message(),
        }
    }
}

impl From<InquiryError> for ApiError {
    fn from(error: InquiryError) -> Self {
        let status = match &error {
            e if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            InquiryError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Agency API is running".to_string(),
    })
}

pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArtistListResponse>, ApiError> {
    let artists = state.artists.fetch_artists_simple().await?;

    Ok(Json(ArtistListResponse {
        count: artists.len(),
        artists,
    }))
}

pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ArtistDetailResponse>, ApiError> {
    let artist = state.artists.fetch_artist_detail(&slug).await?;
    Ok(Json(build_detail_response(artist)))
}

pub async fn get_feed(State(state): State<Arc<AppState>>) -> Json<FeedResponse> {
    Json(state.feed.snapshot().into())
}

pub async fn refresh_feed(State(state): State<Arc<AppState>>) -> Json<FeedResponse> {
    Json(state.feed.refresh().await.into())
}

pub async fn cache_status(State(state): State<Arc<AppState>>) -> Json<CacheStatusResponse> {
    let cache = state.artists.cache();

    Json(CacheStatusResponse {
        status: cache.cache_status(SIMPLE_ARTISTS_KEY),
        entries: cache.len(),
        can_retry: cache.can_retry(),
        last_error: cache.last_error(),
    })
}

pub async fn invalidate_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.artists.invalidate();
    StatusCode::NO_CONTENT
}

pub async fn report_network(
    State(state): State<Arc<AppState>>,
    Json(report): Json<NetworkReport>,
) -> Json<NetworkResponse> {
    let status = if report.online {
        NetworkStatus::Online
    } else {
        NetworkStatus::Offline
    };
    state.network.set_status(status);

    Json(NetworkResponse { status })
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<InquiryForm>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let forwarder = state.contact.as_ref().ok_or(InquiryError::NotConfigured)?;

    let receipt = match forwarder.forward(&form).await {
        Ok(receipt) => receipt,
        Err(error) => {
            tracing::warn!(error = %error, "inquiry not forwarded");
            return Err(error.into());
        }
    };

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            receipt,
            message: "Your inquiry has been received.".to_string(),
        }),
    ))
}

/// Counts over the cached list only; never triggers a fetch.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let cache = state.artists.cache();
    let artists = cache.get(SIMPLE_ARTISTS_KEY).unwrap_or_default();

    let mut by_type: FxHashMap<String, usize> = FxHashMap::default();
    for artist in &artists {
        *by_type
            .entry(artist.artist_type.as_str().to_string())
            .or_default() += 1;
    }

    Json(StatsResponse {
        total_artists: artists.len(),
        by_type,
        cache_status: cache.cache_status(SIMPLE_ARTISTS_KEY),
    })
}
