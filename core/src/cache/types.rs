use crate::error::FetchError;
use crate::models::Artist;
use futures::future::{BoxFuture, Shared};
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, Instant};

pub const CACHE_DURATION: Duration = Duration::from_secs(5 * 60);
pub const ERROR_COOLDOWN: Duration = Duration::from_secs(10);

/// Key under which the public artist list is cached.
pub const SIMPLE_ARTISTS_KEY: &str = "artists:simple";

pub fn artist_detail_key(slug: &str) -> String {
    format!("artist:{slug}")
}

/// A pending fetch that any number of callers can await.
pub type SharedFetch = Shared<BoxFuture<'static, Result<Vec<Artist>, FetchError>>>;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a written entry stays valid.
    pub ttl: Duration,
    /// How long a failure blocks new attempts.
    pub error_cooldown: Duration,
}

impl CacheConfig {
    pub fn new(ttl: Duration, error_cooldown: Duration) -> Self {
        Self {
            ttl,
            error_cooldown,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: CACHE_DURATION,
            error_cooldown: ERROR_COOLDOWN,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Vec<Artist>,
    pub timestamp: Instant,
    pub loading: bool,
    /// False for placeholders created before the first successful write.
    pub populated: bool,
}

impl CacheEntry {
    pub fn new(data: Vec<Artist>) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
            loading: false,
            populated: true,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            data: Vec::new(),
            timestamp: Instant::now(),
            loading: true,
            populated: false,
        }
    }

    pub fn is_valid(&self, ttl: Duration) -> bool {
        self.populated && self.timestamp.elapsed() <= ttl
    }
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub error: FetchError,
    pub timestamp: Instant,
}

impl ErrorRecord {
    pub fn new(error: FetchError) -> Self {
        Self {
            error,
            timestamp: Instant::now(),
        }
    }

    pub fn is_cooling_down(&self, cooldown: Duration) -> bool {
        self.timestamp.elapsed() < cooldown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    None,
    Loading,
    Expired,
    Valid,
}
