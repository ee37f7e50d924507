//! HTTP settings and the request pipeline.
//!
//! [`ApiClient`] is the single place where a request is turned into a result:
//! cache lookup, transport call, status classification, envelope decoding,
//! model hydration and cache write. It holds no mutable state of its own; the
//! injected [`CacheStore`] and [`Transport`] carry all shared state.

use crate::cache::{CacheStore, MemoryCache, NoCache};
use crate::config::{ApiConfig, CacheBackend, ConfigError};
use crate::endpoint::{CacheKey, Endpoint};
use crate::envelope::{decode_body, RawResponse};
use crate::error::{Error, Result};
use crate::request::Request;
use crate::transport::{
    ReqwestTransport, Transport, TransportError, TransportErrorKind, TransportRequest,
};
use secrecy::ExposeSecret;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;
use validator::Validate;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("truckersmp-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
///
/// Configures the reqwest transport: timeouts, connection pooling and
/// compression.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,

    /// User agent header
    pub user_agent: String,
}

impl HttpConfig {
    /// Create a new HTTP configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Derive transport settings from an [`ApiConfig`].
    #[must_use]
    pub fn from_api_config(config: &ApiConfig) -> Self {
        Self::new().with_timeout(config.timeout())
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes endpoint requests against the API.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn CacheStore>,
    base_url: Url,
    headers: BTreeMap<String, String>,
    cache_ttl: Duration,
}

impl ApiClient {
    /// Assemble a client from explicit collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation or the base URL
    /// is invalid.
    pub fn new(
        config: &ApiConfig,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn CacheStore>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let base_url = config.parse_base_url()?;

        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());
        if let Some(api_key) = &config.api_key {
            headers.insert("x-api-key".to_string(), api_key.expose_secret().to_string());
        }

        let cache_ttl = if config.caching_enabled() {
            config.cache_ttl()
        } else {
            Duration::ZERO
        };

        Ok(Self {
            transport,
            cache,
            base_url,
            headers,
            cache_ttl,
        })
    }

    /// Build a client with the reqwest transport and the configured cache backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ApiConfig) -> std::result::Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&HttpConfig::from_api_config(config))?;
        let cache: Arc<dyn CacheStore> = match config.cache_backend {
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
            CacheBackend::Disabled => Arc::new(NoCache),
        };
        Self::new(config, Arc::new(transport), cache)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the effective cache TTL (zero when caching is off).
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Fetch the decoded body for an endpoint, using the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`Error`] kinds.
    pub async fn send(&self, endpoint: &Endpoint) -> Result<RawResponse> {
        self.fetch(endpoint, |raw| Ok(raw.clone())).await
    }

    /// Execute a typed request.
    ///
    /// The model is hydrated before anything is cached, so a response that
    /// fails hydration never reaches the cache.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`Error`] kinds.
    pub async fn get<M>(&self, request: &Request<M>) -> Result<M> {
        self.fetch(request.endpoint(), |raw| request.hydrate(raw)).await
    }

    /// Drop the cached response for an endpoint.
    pub async fn invalidate(&self, endpoint: &Endpoint) {
        self.cache.invalidate(&endpoint.cache_key()).await;
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    async fn fetch<T, F>(&self, endpoint: &Endpoint, accept: F) -> Result<T>
    where
        F: Fn(&RawResponse) -> Result<T>,
    {
        let key = endpoint.cache_key();

        if let Some(cached) = self.cached(&key).await {
            // An entry written through `send` may not fit this request's model.
            match accept(&cached) {
                Ok(value) => {
                    debug!(key = %key, "serving response from cache");
                    return Ok(value);
                }
                Err(err) => {
                    debug!(key = %key, error = %err, "cached response rejected, refetching");
                    self.cache.invalidate(&key).await;
                }
            }
        }

        let raw = self.dispatch(endpoint).await?;
        let value = accept(&raw)?;

        if self.caching_enabled() {
            debug!(key = %key, ttl = ?self.cache_ttl, "caching response");
            self.cache.set(&key, raw, self.cache_ttl).await;
        }

        Ok(value)
    }

    async fn cached(&self, key: &CacheKey) -> Option<RawResponse> {
        if !self.caching_enabled() {
            return None;
        }
        let hit = self.cache.get(key).await;
        if hit.is_none() {
            debug!(key = %key, "cache miss");
        }
        hit
    }

    async fn dispatch(&self, endpoint: &Endpoint) -> Result<RawResponse> {
        let url = self.build_url(endpoint.path())?;
        let request = TransportRequest {
            method: endpoint.method().clone(),
            url,
            headers: self.headers.clone(),
        };

        debug!(method = %request.method, url = %request.url, "sending TruckersMP request");

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(Error::from_status(response.status, &response.body));
        }

        decode_body(response.status, &response.body)
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|err| {
            TransportError::new(
                TransportErrorKind::Request,
                format!("invalid request path `{path}`: {err}"),
            )
            .into()
        })
    }

    const fn caching_enabled(&self) -> bool {
        !self.cache_ttl.is_zero()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}
