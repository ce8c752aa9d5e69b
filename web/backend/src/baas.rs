use agency_core::{ArtistQuery, ArtistRow, ArtistSource, CareerRow, FetchError, UserRow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ARTISTS_TABLE: &str = "artists";
const USERS_TABLE: &str = "users";
const CAREERS_TABLE: &str = "artist_careers";

const ARTIST_COLUMNS: &str = "id,user_id,name_ko,name_en,profile_image,artist_type,created_at";
const USER_COLUMNS: &str = "id,slug";
const CAREER_COLUMNS: &str =
    "id,artist_id,type,title,detail,country,video_url,featured_position,created_at";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Row access to the hosted backend over its PostgREST interface.
pub struct BaasClient {
    client: Client,
    rest_url: String,
    anon_key: String,
}

impl BaasClient {
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.into(),
        }
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, FetchError> {
        let url = format!("{}/{}", self.rest_url, table);

        let response = self
            .client
            .get(&url)
            .query(params)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify_status(status, &body);
            tracing::warn!(table, %status, error = %error, "backend query failed");
            return Err(error);
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| FetchError::Backend(format!("unreadable {table} rows: {e}")))
    }
}

#[async_trait]
impl ArtistSource for BaasClient {
    async fn query_artists(&self, query: &ArtistQuery) -> Result<Vec<ArtistRow>, FetchError> {
        let mut params = vec![("select", ARTIST_COLUMNS.to_string())];
        if !query.artist_types.is_empty() {
            let types: Vec<&str> = query.artist_types.iter().map(|t| t.as_str()).collect();
            params.push(("artist_type", format!("in.({})", types.join(","))));
        }
        if query.newest_first {
            params.push(("order", "created_at.desc".to_string()));
        }
        params.push(("limit", query.limit.to_string()));

        self.select(ARTISTS_TABLE, &params).await
    }

    async fn query_users_by_ids(&self, ids: &[String]) -> Result<Vec<UserRow>, FetchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = [
            ("select", USER_COLUMNS.to_string()),
            ("id", format!("in.({})", ids.join(","))),
        ];
        self.select(USERS_TABLE, &params).await
    }

    async fn query_careers(&self, artist_id: &str) -> Result<Vec<CareerRow>, FetchError> {
        let params = [
            ("select", CAREER_COLUMNS.to_string()),
            ("artist_id", format!("eq.{artist_id}")),
            ("order", "created_at.desc".to_string()),
        ];
        self.select(CAREERS_TABLE, &params).await
    }

    async fn find_user_by_slug(&self, slug: &str) -> Result<Option<UserRow>, FetchError> {
        let params = [
            ("select", USER_COLUMNS.to_string()),
            ("slug", format!("eq.{slug}")),
            ("limit", "1".to_string()),
        ];
        let users: Vec<UserRow> = self.select(USERS_TABLE, &params).await?;
        Ok(users.into_iter().next())
    }

    async fn query_artist_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<ArtistRow>, FetchError> {
        let params = [
            ("select", ARTIST_COLUMNS.to_string()),
            ("user_id", format!("eq.{user_id}")),
            ("limit", "1".to_string()),
        ];
        match self.select::<ArtistRow>(ARTISTS_TABLE, &params).await {
            Ok(rows) => Ok(rows.into_iter().next()),
            // An unknown slug tried as an id is rejected by the uuid column.
            Err(FetchError::Other(message)) if is_invalid_input(&message) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// Postgres' rejection of a value that cannot be cast to the column type.
fn is_invalid_input(message: &str) -> bool {
    message.to_lowercase().contains("invalid input syntax")
}

pub fn classify_transport(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(error.to_string())
    } else if error.is_connect() || error.is_request() {
        FetchError::Network(error.to_string())
    } else if error.is_decode() {
        FetchError::Backend(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}

/// Tags a non-success response by status first, then by the `message`
/// the backend put in the body.
pub fn classify_status(status: StatusCode, body: &str) -> FetchError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));
    let lowered = message.to_lowercase();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Auth(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => FetchError::Timeout(message),
        _ if lowered.contains("jwt") || lowered.contains("auth") => FetchError::Auth(message),
        _ if lowered.contains("timeout") || lowered.contains("abort") => {
            FetchError::Timeout(message)
        }
        _ if status.is_server_error()
            || lowered.contains("database")
            || lowered.contains("relation") =>
        {
            FetchError::Backend(message)
        }
        _ => FetchError::Other(message),
    }
}
