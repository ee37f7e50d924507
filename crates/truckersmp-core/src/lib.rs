//! # truckersmp-core
//!
//! Request pipeline and shared types for the TruckersMP web API.
//!
//! This crate knows nothing about individual endpoints. It turns an
//! [`Endpoint`] plus an [`Envelope`] and a hydration step into either a model
//! or one of five [`Error`] kinds, with a TTL cache in front of the network.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and HTTP status classification
//! - [`config`] - Client configuration and validation
//! - [`client`] - HTTP settings and the request pipeline
//! - [`transport`] - Transport abstraction and the reqwest implementation
//! - [`cache`] - Response cache trait, in-memory store and no-op store
//! - [`endpoint`] - Endpoint descriptors and cache keys
//! - [`envelope`] - Body decoding and payload extraction
//! - [`request`] - Typed requests and model hydration
//! - [`ids`] - Strongly-typed numeric ids
//! - [`types`] - Shared domain types
//! - [`timestamp`] - UTC timestamp parsing

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod request;
pub mod timestamp;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use cache::{CacheStore, MemoryCache, NoCache};
pub use client::{ApiClient, HttpConfig};
pub use config::{ApiConfig, CacheBackend, ConfigError};
pub use endpoint::{CacheKey, Endpoint};
pub use envelope::{Envelope, RawResponse};
pub use error::{Error, ErrorResponse, Result};
pub use ids::{CompanyId, EventId, ParseIdError, ServerId};
pub use request::Request;
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportErrorKind, TransportRequest,
    TransportResponse,
};
pub use types::Game;
