//! Search pipeline: parse, score, rank, filter and hold results for a session.
//!
//! The pieces are leaf-first:
//!
//! - [`parse_query`]: split "country city" input into a [`Query`](crate::models::Query)
//! - [`info_score`]: information-completeness score for one hotel
//! - [`rank_hotels`]: stable sort by score, then star rating
//! - [`filter_by_stars`] and [`display_eligible`]: derive what is shown
//! - [`SearchSession`]: the single-slot result cache owned by the caller
//! - [`HotelSearch`]: ties the above to a [`HotelSource`](crate::sources::HotelSource)
//!
//! Ranking and filtering never suspend; the only await point is the source call.

mod filter;
mod parser;
mod rank;
mod score;
mod service;
mod session;

pub use filter::{display_eligible, filter_by_stars, is_display_eligible};
pub use parser::parse_query;
pub use rank::rank_hotels;
pub use score::{info_score, InfoScore};
pub use service::{HotelSearch, ResultView};
pub use session::{SearchSession, SearchTicket};

use crate::sources::SourceError;

/// Fallback text when the backend gives no usable error message
pub const GENERIC_SEARCH_ERROR: &str = "Error while searching for hotels";

/// Errors surfaced by the search pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Input did not contain both a country and a city
    #[error("Please enter a country and a city separated by a space")]
    InvalidQuery,

    /// Star filter value outside `all` and 1..=5
    #[error("Invalid star filter: {0:?} (expected \"all\" or 1-5)")]
    InvalidSelector(String),

    /// Backend answered HTTP 429
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    /// Backend answered non-2xx with its own message
    #[error("{0}")]
    ApiError(String),

    /// No response from the backend
    #[error("{0}")]
    NetworkError(String),

    /// Well-formed response without a single displayable hotel
    #[error("No hotels with detailed information found")]
    EmptyResult,

    /// Filter requested before any search succeeded
    #[error("No search results to filter")]
    NoActiveResult,

    /// A newer search was issued while this one was in flight
    #[error("Search superseded by a newer request")]
    Superseded,
}

impl SearchError {
    /// Whether the user can fix this by changing input or waiting.
    ///
    /// `NoActiveResult` and `Superseded` come from wiring, not from the user.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, SearchError::NoActiveResult | SearchError::Superseded)
    }
}

impl From<SourceError> for SearchError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::RateLimit => SearchError::RateLimited,
            SourceError::Api(message) => SearchError::ApiError(message),
            SourceError::Parse(detail) => {
                tracing::warn!("Unreadable search response: {}", detail);
                SearchError::ApiError(GENERIC_SEARCH_ERROR.to_string())
            }
            SourceError::Network(_) => SearchError::NetworkError(GENERIC_SEARCH_ERROR.to_string()),
            other => SearchError::ApiError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_mapping() {
        assert_eq!(SearchError::from(SourceError::RateLimit), SearchError::RateLimited);
        assert_eq!(
            SearchError::from(SourceError::Api("City not found".to_string())),
            SearchError::ApiError("City not found".to_string())
        );
        assert_eq!(
            SearchError::from(SourceError::Network("connection refused".to_string())),
            SearchError::NetworkError(GENERIC_SEARCH_ERROR.to_string())
        );
        assert_eq!(
            SearchError::from(SourceError::Parse("JSON: expected value at line 1".to_string())),
            SearchError::ApiError(GENERIC_SEARCH_ERROR.to_string())
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SearchError::RateLimited.to_string(),
            "Too many requests. Please wait a moment and try again."
        );
        assert_eq!(SearchError::ApiError("verbatim".into()).to_string(), "verbatim");
        assert!(SearchError::InvalidQuery.is_user_error());
        assert!(!SearchError::NoActiveResult.is_user_error());
    }
}
