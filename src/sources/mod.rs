//! Hotel search backends behind a common trait.
//!
//! This module defines the [`HotelSource`] trait that every backend implements.
//! The search pipeline only ever sees this trait, so the backend is picked at
//! runtime from configuration or the command line.
//!
//! # Backends
//!
//! - [`ApiSource`] - the hotel search HTTP API (`GET /api/search?country=..&city=..`)
//! - [`OverpassSource`] - OpenStreetMap's Overpass interpreter, queried directly
//! - [`MockSource`] - canned responses for tests
//!
//! # Selecting a backend
//!
//! ```bash
//! # Talk to a search API deployment
//! export HOTEL_SEARCH_API__BASE_URL="https://hotels.example.com"
//! hotel-search search "France Paris"
//!
//! # Skip the API and ask OpenStreetMap directly
//! hotel-search search "France Paris" --source overpass
//! ```

mod api;
pub mod mock;
mod overpass;
mod registry;

pub use api::ApiSource;
pub use mock::MockSource;
pub use overpass::{OverpassSource, OVERPASS_API_URL};
pub use registry::{build_source, SourceKind};

use crate::models::{Query, SearchResponse};
use async_trait::async_trait;

/// The HotelSource trait defines the interface for all hotel search backends.
///
/// # Implementing a New Source
///
/// 1. Create a struct that implements `HotelSource`
/// 2. Map transport outcomes onto [`SourceError`]: HTTP 429 is
///    [`SourceError::RateLimit`], other non-2xx answers are [`SourceError::Api`]
///    with the message the user should see, and missing responses are
///    [`SourceError::Network`]
/// 3. Add a [`SourceKind`] variant and construct it in [`build_source`]
#[async_trait]
pub trait HotelSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "api", "overpass")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch hotels for a parsed query, in backend order
    async fn search(&self, query: &Query) -> Result<SearchResponse, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// API error from the source, carrying its message verbatim
    #[error("{0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("URL: {}", err))
    }
}
