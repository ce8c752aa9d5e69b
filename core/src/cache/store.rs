use crate::cache::types::{CacheConfig, CacheEntry, CacheStatus, ErrorRecord, SharedFetch};
use crate::error::FetchError;
use crate::models::Artist;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

struct InFlight {
    generation: u64,
    fetch: SharedFetch,
}

/// Outcome of [`ArtistCache::loading_promise_or_insert_with`].
pub enum InFlightSlot {
    /// Someone else is already fetching this key.
    Joined(SharedFetch),
    /// The caller registered a new fetch and owns its cleanup.
    Started { fetch: SharedFetch, generation: u64 },
}

/// Time-boxed store of artist lists with an in-flight registry and a
/// single retained error.
///
/// Entries expire lazily: nothing sweeps them, a read of an expired key
/// removes it.
pub struct ArtistCache {
    config: CacheConfig,
    entries: Mutex<FxHashMap<String, CacheEntry>>,
    in_flight: Mutex<FxHashMap<String, InFlight>>,
    last_error: Mutex<Option<ErrorRecord>>,
    next_generation: AtomicU64,
}

impl ArtistCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(FxHashMap::default()),
            in_flight: Mutex::new(FxHashMap::default()),
            last_error: Mutex::new(None),
            next_generation: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn get(&self, key: &str) -> Option<Vec<Artist>> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if entry.is_valid(self.config.ttl) {
            tracing::debug!(key, "artist cache hit");
            return Some(entry.data.clone());
        }

        if entry.populated && !entry.loading {
            tracing::debug!(key, "artist cache entry expired");
            entries.remove(key);
        }
        None
    }

    pub fn set(&self, key: &str, data: Vec<Artist>) {
        tracing::debug!(key, count = data.len(), "storing artists in cache");
        self.entries
            .lock()
            .insert(key.to_string(), CacheEntry::new(data));
        self.last_error.lock().take();
    }

    pub fn set_loading(&self, key: &str, loading: bool) {
        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some(entry) => entry.loading = loading,
            None if loading => {
                entries.insert(key.to_string(), CacheEntry::placeholder());
            }
            None => {}
        }
    }

    /// Registers `fetch` unconditionally and returns its generation.
    pub fn set_loading_promise(&self, key: &str, fetch: SharedFetch) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        self.in_flight
            .lock()
            .insert(key.to_string(), InFlight { generation, fetch });
        generation
    }

    pub fn loading_promise(&self, key: &str) -> Option<SharedFetch> {
        self.in_flight
            .lock()
            .get(key)
            .map(|in_flight| in_flight.fetch.clone())
    }

    /// Joins the fetch registered for `key`, or registers the one built by
    /// `start` while still holding the registry lock.
    pub fn loading_promise_or_insert_with<F>(&self, key: &str, start: F) -> InFlightSlot
    where
        F: FnOnce(u64) -> SharedFetch,
    {
        let mut in_flight = self.in_flight.lock();
        if let Some(existing) = in_flight.get(key) {
            return InFlightSlot::Joined(existing.fetch.clone());
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let fetch = start(generation);
        in_flight.insert(
            key.to_string(),
            InFlight {
                generation,
                fetch: fetch.clone(),
            },
        );
        InFlightSlot::Started { fetch, generation }
    }

    pub fn clear_loading_promise(&self, key: &str) {
        self.in_flight.lock().remove(key);
    }

    /// Removes the registration only if it still belongs to `generation`.
    pub fn clear_loading_promise_for(&self, key: &str, generation: u64) {
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(key)
            .is_some_and(|current| current.generation == generation)
        {
            in_flight.remove(key);
        }
    }

    /// Applies the outcome of the fetch registered under `generation` and
    /// unregisters it. A fetch that was cleared or superseded changes nothing.
    pub fn complete(
        &self,
        key: &str,
        generation: u64,
        result: &Result<Vec<Artist>, FetchError>,
    ) -> bool {
        let mut in_flight = self.in_flight.lock();
        if !in_flight
            .get(key)
            .is_some_and(|current| current.generation == generation)
        {
            tracing::debug!(key, generation, "discarding outcome of a superseded fetch");
            return false;
        }

        match result {
            Ok(artists) => self.set(key, artists.clone()),
            Err(error) => self.set_error(error.clone()),
        }
        self.set_loading(key, false);
        in_flight.remove(key);
        true
    }

    pub fn set_error(&self, error: FetchError) {
        tracing::warn!(kind = error.kind(), %error, "artist fetch failed");
        *self.last_error.lock() = Some(ErrorRecord::new(error));
    }

    pub fn can_retry(&self) -> bool {
        match self.last_error.lock().as_ref() {
            Some(record) => !record.is_cooling_down(self.config.error_cooldown),
            None => true,
        }
    }

    /// The retained error, only while it still blocks new attempts.
    pub fn retained_error(&self) -> Option<FetchError> {
        self.last_error
            .lock()
            .as_ref()
            .filter(|record| record.is_cooling_down(self.config.error_cooldown))
            .map(|record| record.error.clone())
    }

    /// User-facing message of the retained error, while cooling down.
    pub fn last_error(&self) -> Option<String> {
        self.retained_error().map(|error| error.user_message())
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
        self.in_flight.lock().clear();
        self.last_error.lock().take();
        tracing::info!("artist cache cleared");
    }

    pub fn cache_status(&self, key: &str) -> CacheStatus {
        let entries = self.entries.lock();
        match entries.get(key) {
            None => CacheStatus::None,
            Some(entry) if entry.loading => CacheStatus::Loading,
            Some(entry) if !entry.populated => CacheStatus::None,
            Some(entry) if entry.is_valid(self.config.ttl) => CacheStatus::Valid,
            Some(_) => CacheStatus::Expired,
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.populated)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ArtistCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
