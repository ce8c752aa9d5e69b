use crate::cache::{ArtistCache, InFlightSlot, SIMPLE_ARTISTS_KEY, SharedFetch, artist_detail_key};
use crate::careers::demote_collisions;
use crate::error::FetchError;
use crate::models::{Artist, ArtistRow, Career};
use crate::source::{ArtistQuery, ArtistSource};
use crate::string_normalization::{clean_display_name, normalize_slug};
use futures::FutureExt;
use moka::future::Cache;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

const DETAIL_CACHE_CAPACITY: u64 = 500;

/// Entry point for artist data: composes the cache, the in-flight registry
/// and the backend queries.
#[derive(Clone)]
pub struct ArtistService {
    cache: Arc<ArtistCache>,
    source: Arc<dyn ArtistSource>,
    details: Cache<String, Artist>,
}

impl ArtistService {
    pub fn new(source: Arc<dyn ArtistSource>, cache: Arc<ArtistCache>) -> Self {
        let details = Cache::builder()
            .max_capacity(DETAIL_CACHE_CAPACITY)
            .time_to_live(cache.config().ttl)
            .build();

        Self {
            cache,
            source,
            details,
        }
    }

    pub fn cache(&self) -> &Arc<ArtistCache> {
        &self.cache
    }

    pub async fn fetch_artists_simple(&self) -> Result<Vec<Artist>, FetchError> {
        self.fetch_artists(false).await
    }

    /// Returns the public artist list. `force` skips a valid cache entry but
    /// still honours the error cool-down and joins an in-flight fetch.
    pub async fn fetch_artists(&self, force: bool) -> Result<Vec<Artist>, FetchError> {
        let key = SIMPLE_ARTISTS_KEY;

        if let Some(error) = self.cache.retained_error() {
            tracing::debug!("artist fetch refused during error cool-down");
            return Err(error);
        }

        if let Some(in_flight) = self.cache.loading_promise(key) {
            tracing::debug!("joining in-flight artist fetch");
            return in_flight.await;
        }

        if !force {
            if let Some(artists) = self.cache.get(key) {
                return Ok(artists);
            }
        }

        let slot = self
            .cache
            .loading_promise_or_insert_with(key, |generation| self.start_fetch(key, generation));

        match slot {
            InFlightSlot::Joined(fetch) => fetch.await,
            InFlightSlot::Started { fetch, .. } => fetch.await,
        }
    }

    /// Spawns the remote query so it completes even if every caller goes away.
    fn start_fetch(&self, key: &str, generation: u64) -> SharedFetch {
        self.cache.set_loading(key, true);

        let cache = Arc::clone(&self.cache);
        let source = Arc::clone(&self.source);
        let key = key.to_string();

        let handle = tokio::spawn(async move {
            tracing::info!(key = %key, "fetching artists from backend");
            let result = perform_simple_artist_fetch(source.as_ref()).await;

            cache.complete(&key, generation, &result);

            result
        });

        async move {
            handle.await.unwrap_or_else(|join_error| {
                Err(FetchError::Other(format!("artist fetch task failed: {join_error}")))
            })
        }
        .boxed()
        .shared()
    }

    /// Artist with careers, looked up by slug or by user id.
    pub async fn fetch_artist_detail(&self, slug_or_id: &str) -> Result<Artist, FetchError> {
        let slug = normalize_slug(slug_or_id);
        if slug.is_empty() {
            return Err(FetchError::NotFound("artist".to_string()));
        }

        let source = Arc::clone(&self.source);
        self.details
            .try_get_with(artist_detail_key(&slug), async move {
                load_artist_detail(source.as_ref(), &slug).await
            })
            .await
            .map_err(|error| (*error).clone())
    }

    /// Drops cached lists, details, in-flight registrations and the error.
    pub fn invalidate(&self) {
        self.cache.clear();
        self.details.invalidate_all();
    }
}

/// One round trip for the public list plus a batched slug lookup.
pub async fn perform_simple_artist_fetch(
    source: &dyn ArtistSource,
) -> Result<Vec<Artist>, FetchError> {
    let rows = source.query_artists(&ArtistQuery::simple_list()).await?;

    let named: Vec<(ArtistRow, String)> = rows
        .into_iter()
        .filter_map(|row| {
            let name = clean_display_name(row.name_ko.as_deref())?;
            Some((row, name))
        })
        .collect();

    if named.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = FxHashSet::default();
    let user_ids: Vec<String> = named
        .iter()
        .map(|(row, _)| row.user_id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let slugs = resolve_slugs(source, &user_ids).await;

    Ok(named
        .into_iter()
        .map(|(row, name)| {
            let slug = slugs.get(&row.user_id).cloned();
            to_artist(row, name, slug)
        })
        .collect())
}

async fn resolve_slugs(source: &dyn ArtistSource, user_ids: &[String]) -> FxHashMap<String, String> {
    match source.query_users_by_ids(user_ids).await {
        Ok(users) => users
            .into_iter()
            .filter_map(|user| {
                let slug = user.slug.map(|slug| slug.trim().to_string())?;
                (!slug.is_empty()).then_some((user.id, slug))
            })
            .collect(),
        Err(error) => {
            tracing::warn!(%error, "slug lookup failed, using user ids");
            FxHashMap::default()
        }
    }
}

fn to_artist(row: ArtistRow, name_ko: String, slug: Option<String>) -> Artist {
    Artist {
        slug: slug.unwrap_or_else(|| row.user_id.clone()),
        id: row.user_id,
        name_ko,
        name_en: row.name_en.map(|name| name.trim().to_string()).unwrap_or_default(),
        profile_image: row.profile_image.unwrap_or_default(),
        artist_type: row.artist_type,
        careers: None,
    }
}

async fn load_artist_detail(source: &dyn ArtistSource, slug: &str) -> Result<Artist, FetchError> {
    let not_found = || FetchError::NotFound(format!("artist '{slug}'"));

    let (user_id, known_slug) = match source.find_user_by_slug(slug).await? {
        Some(user) => (user.id, Some(slug.to_string())),
        None => (slug.to_string(), None),
    };

    let row = source
        .query_artist_by_user_id(&user_id)
        .await?
        .ok_or_else(not_found)?;
    let name_ko = clean_display_name(row.name_ko.as_deref()).ok_or_else(not_found)?;

    let slug = match known_slug {
        Some(slug) => Some(slug),
        None => resolve_slugs(source, std::slice::from_ref(&user_id))
            .await
            .remove(&user_id),
    };

    let careers: Vec<Career> = source
        .query_careers(&row.id)
        .await?
        .into_iter()
        .map(Career::from)
        .collect();

    let mut artist = to_artist(row, name_ko, slug);
    artist.careers = Some(demote_collisions(careers));
    Ok(artist)
}
