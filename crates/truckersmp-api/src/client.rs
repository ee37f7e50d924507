//! Asynchronous TruckersMP client.

use crate::models::{Company, CompanyEvent, GameTime, Rules, Server, Version};
use crate::requests;
use crate::Result;
use std::sync::Arc;
use tracing::debug;
use truckersmp_core::{
    ApiClient, ApiConfig, CacheBackend, CacheStore, CompanyId, ConfigError, EventId, HttpConfig,
    MemoryCache, NoCache, Request, ReqwestTransport, Transport,
};
use url::Url;

/// Builder for [`TruckersMpClient`].
#[derive(Clone, Default)]
pub struct TruckersMpClientBuilder {
    config: ApiConfig,
    http: Option<HttpConfig>,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn CacheStore>>,
}

impl TruckersMpClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        Ok(Self::from_config(ApiConfig::new(base_url)?))
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: ApiConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Send a static API key with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = self.config.with_api_key(api_key);
        self
    }

    /// Request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Cache TTL in seconds. Zero disables caching.
    #[must_use]
    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.config = self.config.with_cache_ttl(seconds);
        self
    }

    /// Select the cache backend.
    #[must_use]
    pub fn with_cache_backend(mut self, backend: CacheBackend) -> Self {
        self.config = self.config.with_cache_backend(backend);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http = Some(config);
        self
    }

    /// Use a caller-supplied transport instead of reqwest.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Share a cache store, e.g. between several clients.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn build(self) -> std::result::Result<TruckersMpClient, ConfigError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http = self
                    .http
                    .unwrap_or_else(|| HttpConfig::from_api_config(&self.config));
                Arc::new(ReqwestTransport::new(&http)?)
            }
        };

        let cache: Arc<dyn CacheStore> = match self.cache {
            Some(cache) => cache,
            None if self.config.cache_backend == CacheBackend::Disabled => Arc::new(NoCache),
            None => Arc::new(MemoryCache::new()),
        };

        let inner = ApiClient::new(&self.config, transport, cache)?;
        debug!(
            base_url = %inner.base_url(),
            cache_ttl = ?inner.cache_ttl(),
            "built TruckersMP client"
        );

        Ok(TruckersMpClient { inner })
    }
}

impl std::fmt::Debug for TruckersMpClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TruckersMpClientBuilder")
            .field("config", &self.config)
            .field("http", &self.http)
            .field("custom_transport", &self.transport.is_some())
            .field("custom_cache", &self.cache.is_some())
            .finish()
    }
}

/// Asynchronous TruckersMP client.
///
/// Cloning is cheap; clones share the transport and the cache.
#[derive(Debug, Clone)]
pub struct TruckersMpClient {
    inner: ApiClient,
}

impl TruckersMpClient {
    /// Builder pointing at the public API.
    #[must_use]
    pub fn builder() -> TruckersMpClientBuilder {
        TruckersMpClientBuilder::default()
    }

    /// Construct a client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        TruckersMpClientBuilder::new(base_url)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Access the underlying pipeline.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.inner
    }

    /// Fetch one event of a company.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn company_event(&self, company: CompanyId, event: EventId) -> Result<CompanyEvent> {
        self.execute(&requests::company_event(company, event)).await
    }

    /// List the events of a company.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn company_events(&self, company: CompanyId) -> Result<Vec<CompanyEvent>> {
        self.execute(&requests::company_events(company)).await
    }

    /// Fetch a company.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn company(&self, company: CompanyId) -> Result<Company> {
        self.execute(&requests::company(company)).await
    }

    /// Fetch the in-game rules.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn rules(&self) -> Result<Rules> {
        self.execute(&requests::rules()).await
    }

    /// Fetch the current mod version and checksums.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn version(&self) -> Result<Version> {
        self.execute(&requests::version()).await
    }

    /// List the multiplayer servers.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn servers(&self) -> Result<Vec<Server>> {
        self.execute(&requests::servers()).await
    }

    /// Fetch the in-game clock.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn game_time(&self) -> Result<GameTime> {
        self.execute(&requests::game_time()).await
    }

    /// Execute any request, including ones defined outside this crate.
    ///
    /// # Errors
    ///
    /// Returns one of the five [`crate::Error`] kinds.
    pub async fn execute<M>(&self, request: &Request<M>) -> Result<M> {
        self.inner.get(request).await
    }

    /// Drop the cached response of a request.
    pub async fn invalidate<M>(&self, request: &Request<M>) {
        self.inner.invalidate(request.endpoint()).await;
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.inner.clear_cache().await;
    }
}
