use agency_core::CacheConfig;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROBE_URL: &str = "https://www.google.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { name: &'static str, value: String },
}

/// Process configuration, read from the environment (and `.env` in `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub baas_url: String,
    pub baas_anon_key: String,
    /// Spreadsheet script receiving contact inquiries. Forwarding is
    /// disabled without it.
    pub form_endpoint_url: Option<String>,
    pub bind_addr: String,
    /// Host probed when the platform has not reported connectivity.
    /// An empty value disables probing.
    pub network_probe_url: Option<String>,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).map(|v| v.trim().to_string());
        let required = |name: &'static str| {
            value(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let seconds = |name: &'static str, default: Duration| match value(name) {
            None => Ok(default),
            Some(raw) if raw.is_empty() => Ok(default),
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidSeconds { name, value: raw }),
        };

        let defaults = CacheConfig::default();
        let cache = CacheConfig::new(
            seconds("ARTIST_CACHE_TTL_SECS", defaults.ttl)?,
            seconds("ERROR_COOLDOWN_SECS", defaults.error_cooldown)?,
        );

        let network_probe_url = match value("NETWORK_PROBE_URL") {
            None => Some(DEFAULT_PROBE_URL.to_string()),
            Some(url) if url.is_empty() => None,
            Some(url) => Some(url),
        };

        Ok(Self {
            baas_url: required("BAAS_URL")?,
            baas_anon_key: required("BAAS_ANON_KEY")?,
            form_endpoint_url: value("FORM_ENDPOINT_URL").filter(|v| !v.is_empty()),
            bind_addr: value("BIND_ADDR")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            network_probe_url,
            cache,
        })
    }
}
