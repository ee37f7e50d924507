//! Endpoint descriptors and cache keys.

use reqwest::Method;
use std::fmt;

/// One API call: method plus fully resolved path.
///
/// Paths are relative to the configured base URL (`vtc/5/events/10`, not
/// `/v2/vtc/5/events/10`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    path: String,
}

impl Endpoint {
    /// Create a descriptor. Leading slashes are stripped.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_start_matches('/').to_string();
        Self { method, path }
    }

    /// Create a GET descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Key under which a successful response for this endpoint is cached.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        if self.method == Method::GET {
            CacheKey(self.path.clone())
        } else {
            CacheKey(format!("{} {}", self.method, self.path))
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Deterministic cache key derived from an [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Endpoint> for CacheKey {
    fn from(endpoint: &Endpoint) -> Self {
        endpoint.cache_key()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
