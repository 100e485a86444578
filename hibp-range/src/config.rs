use reqwest::Url;

use crate::error::ConfigError;

/// Environment variable name for overriding the range API base URL.
pub const HIBP_RANGE_URL_ENV: &str = "HIBP_RANGE_URL";

/// Public Pwned Passwords endpoint; `/range/<prefix>` is appended per query.
pub const DEFAULT_RANGE_URL: &str = "https://api.pwnedpasswords.com";

/// Settings for building a [`crate::RangeQueryClient`] backed by reqwest.
///
/// The per-call timeout is deliberately not here; it is passed to every check.
#[derive(Debug, Clone)]
pub struct RangeClientConfig {
    pub base_url: Url,
    /// Idle keep-alive connections kept per host by the connection pool.
    pub pool_max_idle_per_host: usize,
    /// Default `User-Agent` for requests that do not pass their own.
    pub user_agent: Option<String>,
}

impl Default for RangeClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_RANGE_URL).expect("default range URL is valid"),
            pool_max_idle_per_host: 32,
            user_agent: None,
        }
    }
}

impl RangeClientConfig {
    /// Returns the default configuration with the base URL taken from the
    /// `HIBP_RANGE_URL` environment variable when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(HIBP_RANGE_URL_ENV) {
            config.base_url = parse_base_url(&value)?;
        }
        Ok(config)
    }
}

/// Parses a range API base URL, rejecting URLs that cannot carry a path.
pub fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_owned(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_owned(),
            reason: "URL cannot have path segments".to_owned(),
        });
    }

    Ok(url)
}
