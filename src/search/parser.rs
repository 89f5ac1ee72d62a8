//! Free-text query parsing.

use crate::models::Query;
use crate::search::SearchError;

/// Split raw input into a country and a city.
///
/// The first whitespace-delimited token is the country, the rest joined with
/// single spaces is the city. Case is left alone.
pub fn parse_query(raw: &str) -> Result<Query, SearchError> {
    let mut tokens = raw.split_whitespace();

    let (Some(country), Some(first_city)) = (tokens.next(), tokens.next()) else {
        tracing::debug!("Rejected query {:?}: fewer than two tokens", raw);
        return Err(SearchError::InvalidQuery);
    };

    let city = std::iter::once(first_city)
        .chain(tokens)
        .collect::<Vec<_>>()
        .join(" ");

    tracing::debug!("Parsed query: country={:?} city={:?}", country, city);
    Ok(Query::new(country.to_string(), city))
}
