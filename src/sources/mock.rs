//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Hotel, HotelBuilder, Query, SearchResponse};
use crate::sources::{HotelSource, SourceError};

/// A mock source for testing that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockSource {
    outcome: Mutex<Option<Result<SearchResponse, SourceError>>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source that answers with no hotels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search response to return.
    pub fn set_search_response(&self, response: SearchResponse) {
        let mut guard = self.outcome.lock().unwrap();
        *guard = Some(Ok(response));
    }

    /// Make every following search fail with `error`.
    pub fn set_error(&self, error: SourceError) {
        let mut guard = self.outcome.lock().unwrap();
        *guard = Some(Err(error));
    }

    /// Clear the configured outcome.
    pub fn clear_response(&self) {
        let mut guard = self.outcome.lock().unwrap();
        *guard = None;
    }

    /// Number of searches received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HotelSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, _query: &Query) -> Result<SearchResponse, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.outcome.lock().unwrap();
        match &*guard {
            Some(outcome) => outcome.clone(),
            None => Ok(SearchResponse::new(Vec::new())),
        }
    }
}

/// Helper function to create a displayable mock hotel for testing.
pub fn make_hotel(name: &str, stars: &str) -> Hotel {
    let slug = name.to_lowercase().replace(' ', "-");
    HotelBuilder::new()
        .name(name)
        .address(format!("1 {} Street", name))
        .website(format!("http://example.com/{}", slug))
        .stars(stars)
        .build()
}
