pub mod cache;
pub mod careers;
pub mod connectivity;
pub mod error;
pub mod feed;
pub mod feed_config;
pub mod fetcher;
pub mod models;
pub mod source;
pub mod string_normalization;

// Re-export commonly used items
pub use cache::{ArtistCache, CacheConfig, CacheStatus, SIMPLE_ARTISTS_KEY};
pub use careers::{CareerError, CareerGroups, group_careers, validate_featured};
pub use connectivity::{Connectivity, NetworkMonitor, NetworkStatus};
pub use error::{FetchError, describe};
pub use feed::{ArtistFeed, FeedState};
pub use feed_config::FeedConfig;
pub use fetcher::{ArtistService, perform_simple_artist_fetch};
pub use models::{Artist, ArtistRow, ArtistType, Career, CareerRow, CareerType, UserRow};
pub use source::{ArtistQuery, ArtistSource};
