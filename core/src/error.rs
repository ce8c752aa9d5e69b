use thiserror::Error;

pub const NETWORK_MESSAGE: &str = "Please check your network connection.";
pub const AUTH_MESSAGE: &str = "There was a problem with your session. Please refresh the page.";
pub const BACKEND_MESSAGE: &str = "The storage backend is unavailable. Please try again shortly.";
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";
pub const UNKNOWN_MESSAGE: &str = "An unknown error occurred.";

/// Failure of an artist data operation, tagged where it originates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication error: {0}")]
    Auth(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Message suitable for showing to a visitor.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network(_) => NETWORK_MESSAGE.to_string(),
            FetchError::Auth(_) => AUTH_MESSAGE.to_string(),
            FetchError::Backend(_) => BACKEND_MESSAGE.to_string(),
            FetchError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
            FetchError::NotFound(what) => format!("{what} was not found."),
            FetchError::Other(message) => message.clone(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Auth(_) => "auth",
            FetchError::Backend(_) => "backend",
            FetchError::Timeout(_) => "timeout",
            FetchError::NotFound(_) => "not_found",
            FetchError::Other(_) => "other",
        }
    }
}

/// User-facing description of an optional error.
pub fn describe(error: Option<&FetchError>) -> String {
    error
        .map(FetchError::user_message)
        .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string())
}
