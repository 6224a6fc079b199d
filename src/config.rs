//! Backend client configuration.
//!
//! Settings come from environment variables:
//!
//! - `TASKBOARD_API_URL`: REST base URL, default `http://localhost:8080/api`
//! - `TASKBOARD_TOKEN`: bearer token, optional
//! - `TASKBOARD_TIMEOUT_SECS`: request timeout in seconds, default 10

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the REST base URL.
pub const API_URL_VAR: &str = "TASKBOARD_API_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "TASKBOARD_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "TASKBOARD_TIMEOUT_SECS";

/// REST base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not parse or is not `http(s)`.
    #[error("invalid backend URL '{0}'")]
    InvalidUrl(String),

    /// The timeout is not a positive whole number of seconds.
    #[error("invalid timeout '{0}', expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Settings for reaching the REST backend.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default timeout and no
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when `base_url` is not an
    /// `http(s)` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        let parsed =
            Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl(trimmed.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(trimmed.to_owned()));
        }
        Ok(Self {
            base_url: parsed,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let base_url = present(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let mut config = Self::new(&base_url)?;
        if let Some(token) = present(TOKEN_VAR) {
            config = config.with_token(token);
        }
        if let Some(raw) = present(TIMEOUT_VAR) {
            config = config.with_timeout(parse_timeout(&raw)?);
        }
        Ok(config)
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the REST base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Returns the origin serving uploaded assets such as avatars.
    #[must_use]
    pub fn asset_origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }

    /// Returns the bearer token, if configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_owned())),
    }
}
