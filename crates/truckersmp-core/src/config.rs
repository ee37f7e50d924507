//! Configuration structures for TruckersMP clients.
//!
//! [`ApiConfig`] is the surface a host application fills in (usually by
//! deserializing it from its own configuration file). Values are validated on
//! construction; the request pipeline only ever sees the derived URL, timeout
//! and cache settings.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;
use validator::Validate;

/// Public TruckersMP API root.
pub const DEFAULT_BASE_URL: &str = "https://api.truckersmp.com/v2/";

/// Errors raised while building a client from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Where successful responses are cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local TTL cache
    #[default]
    Memory,
    /// Every call goes to the network
    Disabled,
}

/// Configuration for a TruckersMP client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// API base URL
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional static API key, sent as `X-Api-Key`
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long a successful response stays cached, in seconds (0 disables caching)
    #[validate(range(max = 86400))]
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Cache backend selection
    #[serde(default)]
    pub cache_backend: CacheBackend,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

impl ApiConfig {
    /// Create a configuration pointing at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };

        config.validate()?;

        Ok(config)
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set cache TTL in seconds.
    #[must_use]
    pub const fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl_secs = seconds;
        self
    }

    /// Select the cache backend.
    #[must_use]
    pub const fn with_cache_backend(mut self, backend: CacheBackend) -> Self {
        self.cache_backend = backend;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the cache TTL as a Duration.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Whether responses should be cached at all.
    #[must_use]
    pub fn caching_enabled(&self) -> bool {
        self.cache_backend != CacheBackend::Disabled && self.cache_ttl_secs > 0
    }

    /// Parse the base URL, making sure it ends with `/` so relative paths
    /// join underneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_backend: CacheBackend::default(),
        }
    }
}
