use crate::error::FetchError;
use crate::models::{ArtistRow, ArtistType, CareerRow, UserRow};
use async_trait::async_trait;

/// Row limit of the public artist list.
pub const SIMPLE_ARTIST_LIMIT: usize = 20;

/// Filters for the artist profile query.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistQuery {
    pub artist_types: Vec<ArtistType>,
    /// Sort by creation time, newest first.
    pub newest_first: bool,
    pub limit: usize,
}

impl ArtistQuery {
    /// Professional artists, newest first, capped at twenty rows.
    pub fn simple_list() -> Self {
        Self {
            artist_types: ArtistType::PROFESSIONAL.to_vec(),
            newest_first: true,
            limit: SIMPLE_ARTIST_LIMIT,
        }
    }
}

/// Row-level access to the hosted backend.
#[async_trait]
pub trait ArtistSource: Send + Sync {
    async fn query_artists(&self, query: &ArtistQuery) -> Result<Vec<ArtistRow>, FetchError>;

    async fn query_users_by_ids(&self, ids: &[String]) -> Result<Vec<UserRow>, FetchError>;

    /// Careers of one artist profile, newest first.
    async fn query_careers(&self, artist_id: &str) -> Result<Vec<CareerRow>, FetchError>;

    async fn find_user_by_slug(&self, slug: &str) -> Result<Option<UserRow>, FetchError>;

    async fn query_artist_by_user_id(&self, user_id: &str)
    -> Result<Option<ArtistRow>, FetchError>;
}
