//! Search request and response models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Hotel;
use crate::search::{rank_hotels, SearchError};

/// A parsed "country city" query
///
/// Built by [`crate::search::parse_query`] or [`Query::from_parts`], so both
/// parts are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    country: String,
    city: String,
}

impl Query {
    pub(crate) fn new(country: String, city: String) -> Self {
        Self { country, city }
    }

    /// Build a query from a country and a city that are already separate,
    /// e.g. the location a backend echoes back.
    ///
    /// Each part keeps its inner words ("United States"); whitespace runs
    /// collapse to single spaces. Fails with [`SearchError::InvalidQuery`]
    /// if either part is blank.
    pub fn from_parts(country: &str, city: &str) -> Result<Self, SearchError> {
        let collapse = |part: &str| part.split_whitespace().collect::<Vec<_>>().join(" ");
        let (country, city) = (collapse(country), collapse(city));
        if country.is_empty() || city.is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        Ok(Self::new(country, city))
    }

    /// Country token, as typed
    pub fn country(&self) -> &str {
        &self.country
    }

    /// City tokens joined with single spaces, as typed
    pub fn city(&self) -> &str {
        &self.city
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.country, self.city)
    }
}

/// Star rating filter chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarSelector {
    /// No filtering
    #[default]
    All,
    /// Exactly this many stars (1..=5)
    Stars(u8),
}

impl StarSelector {
    /// Every selector in the order the filter menu lists them
    pub const CHOICES: [StarSelector; 6] = [
        StarSelector::All,
        StarSelector::Stars(5),
        StarSelector::Stars(4),
        StarSelector::Stars(3),
        StarSelector::Stars(2),
        StarSelector::Stars(1),
    ];

    /// Numeric rating this selector keeps, `None` for [`StarSelector::All`]
    pub fn rating(&self) -> Option<f64> {
        match self {
            StarSelector::All => None,
            StarSelector::Stars(n) => Some(f64::from(*n)),
        }
    }

    /// Human-readable menu label
    pub fn label(&self) -> String {
        match self {
            StarSelector::All => "All stars".to_string(),
            StarSelector::Stars(1) => "1 star".to_string(),
            StarSelector::Stars(n) => format!("{} stars", n),
        }
    }
}

impl fmt::Display for StarSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarSelector::All => write!(f, "all"),
            StarSelector::Stars(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for StarSelector {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(StarSelector::All);
        }
        match value.parse::<u8>() {
            Ok(n @ 1..=5) => Ok(StarSelector::Stars(n)),
            _ => Err(SearchError::InvalidSelector(s.to_string())),
        }
    }
}

impl Serialize for StarSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hotels produced by one successful search, in ranked order
///
/// Immutable once built; a new search replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    query: Query,
    hotels: Vec<Hotel>,
}

impl RankedResult {
    /// Rank raw hotels for a query
    pub fn new(query: Query, hotels: Vec<Hotel>) -> Self {
        Self {
            query,
            hotels: rank_hotels(hotels),
        }
    }

    /// The query that produced these results
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Hotels in ranked order
    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    /// Number of ranked hotels
    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    /// Check if there are no ranked hotels
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

/// Body of a successful search API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Hotels found, in backend order
    #[serde(default)]
    pub hotels: Vec<Hotel>,

    /// City as echoed back by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Country as echoed back by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self {
            hotels,
            city: None,
            country: None,
        }
    }

    /// Set the echoed location
    pub fn location(mut self, country: impl Into<String>, city: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self.city = Some(city.into());
        self
    }
}

/// Body of a non-2xx search API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
