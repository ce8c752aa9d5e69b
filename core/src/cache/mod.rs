pub mod store;
pub mod types;

pub use store::{ArtistCache, InFlightSlot};
pub use types::{
    CACHE_DURATION, CacheConfig, CacheEntry, CacheStatus, ERROR_COOLDOWN, ErrorRecord,
    SIMPLE_ARTISTS_KEY, SharedFetch, artist_detail_key,
};
