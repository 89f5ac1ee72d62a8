//! # Hotel Search
//!
//! A client library for searching hotels by "country city" queries, ranking the
//! results by how much information each record carries, and filtering the ranked
//! set by star rating without re-querying the API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Hotel, Query, StarSelector, etc.)
//! - [`search`]: Query parsing, scoring, ranking, filtering and the session cache
//! - [`sources`]: Hotel search backends behind the [`HotelSource`] trait
//! - [`utils`]: HTTP client and string transforms
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal rendering for the command-line front-end

pub mod config;
pub mod models;
pub mod search;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{Hotel, Query, StarSelector};
pub use search::{HotelSearch, ResultView, SearchError};
pub use sources::HotelSource;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
