//! Search orchestration for a single session.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::{Hotel, Query, RankedResult, StarSelector};
use crate::search::{display_eligible, parse_query, SearchError, SearchSession};
use crate::sources::HotelSource;
use crate::utils::format_for_display;

/// What the rendering layer receives after a search or a filter change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    /// Country, display-cased
    pub country: String,

    /// City, display-cased
    pub city: String,

    /// Selector the hotels were filtered with
    pub selector: StarSelector,

    /// Display-eligible hotels in ranked order
    pub hotels: Vec<Hotel>,

    /// Number of hotels in `hotels`
    pub count: usize,
}

impl ResultView {
    /// Build a view from ranked (and possibly star-filtered) hotels.
    ///
    /// Display eligibility is applied here, so every view honours it.
    pub fn new(query: &Query, selector: StarSelector, hotels: Vec<Hotel>) -> Self {
        let hotels = display_eligible(hotels);
        Self {
            country: format_for_display(query.country()),
            city: format_for_display(query.city()),
            selector,
            count: hotels.len(),
            hotels,
        }
    }

    /// Check if nothing is shown
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

/// Runs searches against a [`HotelSource`] and keeps the session's results.
///
/// The session slot sits behind a mutex so a multi-threaded host serializes
/// writes to it; the lock is never held across the source call.
#[derive(Debug)]
pub struct HotelSearch {
    source: Arc<dyn HotelSource>,
    session: Mutex<SearchSession>,
}

impl HotelSearch {
    /// Create a search session backed by `source`
    pub fn new(source: Arc<dyn HotelSource>) -> Self {
        Self {
            source,
            session: Mutex::new(SearchSession::new()),
        }
    }

    /// Parse `raw`, fetch, rank and cache the results.
    ///
    /// Returns the unfiltered view. Invalid input fails before any backend
    /// call. If a newer search is submitted while this one is in flight, this
    /// one ends with [`SearchError::Superseded`] and changes nothing.
    pub async fn submit(&self, raw: &str) -> Result<ResultView, SearchError> {
        let ticket = self.session().begin_search();

        let query = match parse_query(raw) {
            Ok(query) => query,
            Err(err) => return Err(self.session().fail(ticket, err)),
        };

        tracing::info!("Searching hotels in '{}' via {}", query, self.source.name());

        let response = match self.source.search(&query).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Search for '{}' failed: {}", query, err);
                return Err(self.session().fail(ticket, err.into()));
            }
        };

        let ranked = RankedResult::new(query, response.hotels);
        let view = ResultView::new(ranked.query(), StarSelector::All, ranked.hotels().to_vec());
        tracing::debug!(
            "Ranked {} hotels, {} displayable",
            ranked.len(),
            view.count
        );

        if view.is_empty() {
            return Err(self.session().fail(ticket, SearchError::EmptyResult));
        }

        self.session().install(ticket, ranked)?;
        tracing::info!("Found {} hotels in {}, {}", view.count, view.city, view.country);
        Ok(view)
    }

    /// Re-filter the cached results without another backend call
    pub fn filter(&self, selector: StarSelector) -> Result<ResultView, SearchError> {
        let mut session = self.session();
        let hotels = session.filter(selector)?;
        let ranked = session.current().ok_or(SearchError::NoActiveResult)?;
        Ok(ResultView::new(ranked.query(), selector, hotels))
    }

    /// Like [`HotelSearch::filter`], taking the selector as typed ("all", "1".."5")
    pub fn filter_str(&self, selector: &str) -> Result<ResultView, SearchError> {
        self.filter(selector.parse()?)
    }

    /// Whether a result is cached and can be filtered
    pub fn is_active(&self) -> bool {
        self.session().is_active()
    }

    fn session(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
