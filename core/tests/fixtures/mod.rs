#![allow(dead_code)]

use agency_core::cache::ArtistCache;
use agency_core::{
    ArtistQuery, ArtistRow, ArtistService, ArtistSource, ArtistType, CacheConfig, CareerRow,
    CareerType, FetchError, UserRow,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{Duration, Instant};

/// In-memory stand-in for the hosted backend.
pub struct FakeSource {
    artists: Mutex<Result<Vec<ArtistRow>, FetchError>>,
    users: Mutex<Result<Vec<UserRow>, FetchError>>,
    careers: Mutex<Vec<CareerRow>>,
    delay: Duration,
    delays: Mutex<VecDeque<Duration>>,
    pub artist_calls: AtomicUsize,
    pub career_calls: AtomicUsize,
    pub call_times: Mutex<Vec<Instant>>,
    pub last_query: Mutex<Option<ArtistQuery>>,
}

impl FakeSource {
    pub fn new(rows: Vec<ArtistRow>) -> Self {
        Self {
            artists: Mutex::new(Ok(rows)),
            users: Mutex::new(Ok(Vec::new())),
            careers: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            delays: Mutex::new(VecDeque::new()),
            artist_calls: AtomicUsize::new(0),
            career_calls: AtomicUsize::new(0),
            call_times: Mutex::new(Vec::new()),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        let source = Self::new(Vec::new());
        source.set_artists(Err(error));
        source
    }

    pub fn with_users(self, users: Vec<UserRow>) -> Self {
        *self.users.lock() = Ok(users);
        self
    }

    pub fn with_failing_users(self, error: FetchError) -> Self {
        *self.users.lock() = Err(error);
        self
    }

    pub fn with_careers(self, careers: Vec<CareerRow>) -> Self {
        *self.careers.lock() = careers;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Per-call delays for the list query, used before falling back to `delay`.
    pub fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock() = delays.into();
        self
    }

    pub fn set_artists(&self, result: Result<Vec<ArtistRow>, FetchError>) {
        *self.artists.lock() = result;
    }

    pub fn calls(&self) -> usize {
        self.artist_calls.load(Ordering::SeqCst)
    }

    pub fn career_calls(&self) -> usize {
        self.career_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtistSource for FakeSource {
    async fn query_artists(&self, query: &ArtistQuery) -> Result<Vec<ArtistRow>, FetchError> {
        self.artist_calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().push(Instant::now());
        *self.last_query.lock() = Some(query.clone());
        let result = self.artists.lock().clone();

        let delay = self.delays.lock().pop_front().unwrap_or(self.delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn query_users_by_ids(&self, ids: &[String]) -> Result<Vec<UserRow>, FetchError> {
        let users = self.users.lock().clone()?;
        Ok(users
            .into_iter()
            .filter(|user| ids.contains(&user.id))
            .collect())
    }

    async fn query_careers(&self, artist_id: &str) -> Result<Vec<CareerRow>, FetchError> {
        self.career_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .careers
            .lock()
            .iter()
            .filter(|career| career.artist_id == artist_id)
            .cloned()
            .collect())
    }

    async fn find_user_by_slug(&self, slug: &str) -> Result<Option<UserRow>, FetchError> {
        let users = self.users.lock().clone()?;
        Ok(users
            .into_iter()
            .find(|user| user.slug.as_deref() == Some(slug)))
    }

    async fn query_artist_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<ArtistRow>, FetchError> {
        let rows = self.artists.lock().clone()?;
        Ok(rows.into_iter().find(|row| row.user_id == user_id))
    }
}

pub fn artist_row(id: &str, user_id: &str, name_ko: Option<&str>) -> ArtistRow {
    ArtistRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name_ko: name_ko.map(str::to_string),
        name_en: None,
        profile_image: None,
        artist_type: ArtistType::Choreographer,
        created_at: None,
    }
}

pub fn user(id: &str, slug: Option<&str>) -> UserRow {
    UserRow {
        id: id.to_string(),
        slug: slug.map(str::to_string),
    }
}

pub fn career_row(
    id: &str,
    artist_id: &str,
    career_type: CareerType,
    featured_position: Option<i32>,
) -> CareerRow {
    CareerRow {
        id: id.to_string(),
        artist_id: artist_id.to_string(),
        career_type,
        title: format!("Career {id}"),
        detail: None,
        country: Some("KR".to_string()),
        video_url: None,
        featured_position,
        created_at: None,
    }
}

pub fn sample_rows() -> Vec<ArtistRow> {
    vec![
        artist_row("p1", "u1", Some("리아")),
        artist_row("p2", "u2", Some("하준")),
    ]
}

pub fn service_with(source: Arc<FakeSource>, config: CacheConfig) -> ArtistService {
    ArtistService::new(source, Arc::new(ArtistCache::new(config)))
}

pub fn no_cooldown() -> CacheConfig {
    CacheConfig {
        error_cooldown: Duration::ZERO,
        ..CacheConfig::default()
    }
}
