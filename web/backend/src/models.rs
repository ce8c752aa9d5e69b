use agency_core::{Artist, ArtistType, CacheStatus, Career, FeedState, NetworkStatus};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtistListResponse {
    pub artists: Vec<Artist>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtistDetailResponse {
    pub id: String,
    pub slug: String,
    pub name_ko: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub artist_type: ArtistType,
    /// Highlighted careers ordered by type, then position.
    pub featured_careers: Vec<Career>,
    pub careers: Vec<Career>,
    pub career_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub artists: Vec<Artist>,
    pub loading: bool,
    pub retry_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FeedState> for FeedResponse {
    fn from(state: FeedState) -> Self {
        let error = state.error_message();
        Self {
            artists: state.artists,
            loading: state.loading,
            retry_count: state.retry_count,
            error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatusResponse {
    pub status: CacheStatus,
    pub entries: usize,
    pub can_retry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkReport {
    pub online: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub status: NetworkStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub receipt: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_artists: usize,
    pub by_type: FxHashMap<String, usize>,
    pub cache_status: CacheStatus,
}
