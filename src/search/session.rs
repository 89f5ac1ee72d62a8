//! Per-session result cache.

use crate::models::{Hotel, RankedResult, StarSelector};
use crate::search::{filter_by_stars, SearchError};

/// Proof that a search was issued, used to detect stale responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Holds the last ranked result of one search session.
///
/// At most one [`RankedResult`] lives here. Only the most recently issued
/// search may install a result; answers to older searches are discarded.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest_issued: u64,
    current: Option<RankedResult>,
    selector: StarSelector,
}

impl SearchSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new search. Any ticket issued before it becomes stale.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest_issued += 1;
        SearchTicket(self.latest_issued)
    }

    /// Whether `ticket` belongs to the most recently issued search
    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest_issued
    }

    /// Replace the cached result with the outcome of a successful search.
    ///
    /// Resets the selector to [`StarSelector::All`].
    pub fn install(
        &mut self,
        ticket: SearchTicket,
        ranked: RankedResult,
    ) -> Result<&RankedResult, SearchError> {
        if !self.is_latest(ticket) {
            tracing::warn!(
                "Discarding stale results for '{}' (request {}, latest {})",
                ranked.query(),
                ticket.0,
                self.latest_issued
            );
            return Err(SearchError::Superseded);
        }

        self.selector = StarSelector::All;
        Ok(self.current.insert(ranked))
    }

    /// Record a failed search, returning the session to idle.
    ///
    /// Failures of stale searches leave the session untouched and report
    /// [`SearchError::Superseded`] instead of `error`.
    pub fn fail(&mut self, ticket: SearchTicket, error: SearchError) -> SearchError {
        if !self.is_latest(ticket) {
            tracing::debug!("Ignoring failure of stale request {}: {}", ticket.0, error);
            return SearchError::Superseded;
        }
        self.reset();
        error
    }

    /// Drop the cached result
    pub fn reset(&mut self) {
        self.current = None;
        self.selector = StarSelector::All;
    }

    /// Re-derive the visible subset of the cached result for `selector`.
    pub fn filter(&mut self, selector: StarSelector) -> Result<Vec<Hotel>, SearchError> {
        let ranked = self.current.as_ref().ok_or(SearchError::NoActiveResult)?;
        let hotels = filter_by_stars(ranked, selector);
        self.selector = selector;
        tracing::debug!(
            "Filter {} kept {} of {} hotels",
            selector,
            hotels.len(),
            ranked.len()
        );
        Ok(hotels)
    }

    /// The cached result, if a search has succeeded
    pub fn current(&self) -> Option<&RankedResult> {
        self.current.as_ref()
    }

    /// The selector last applied to the cached result
    pub fn selector(&self) -> StarSelector {
        self.selector
    }

    /// Whether a result is cached and filtering is possible
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
