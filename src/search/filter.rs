//! Star-rating filter and display eligibility.

use crate::models::{Hotel, RankedResult, StarSelector};

/// Keep the ranked hotels matching a star selector, preserving order.
///
/// [`StarSelector::All`] returns the whole ranked sequence. A numeric
/// selector keeps only hotels whose rating equals it exactly, so hotels
/// without a parsable rating never match.
pub fn filter_by_stars(ranked: &RankedResult, selector: StarSelector) -> Vec<Hotel> {
    match selector.rating() {
        None => ranked.hotels().to_vec(),
        Some(wanted) => ranked
            .hotels()
            .iter()
            .filter(|hotel| hotel.star_rating() == Some(wanted))
            .cloned()
            .collect(),
    }
}

/// A hotel is shown only with both a non-empty website and address.
pub fn is_display_eligible(hotel: &Hotel) -> bool {
    let filled = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
    filled(&hotel.website) && filled(&hotel.address)
}

/// Drop hotels that cannot be shown.
///
/// Apply after ranking and filtering, never before, so hidden hotels still
/// take part in scoring.
pub fn display_eligible<I>(hotels: I) -> Vec<Hotel>
where
    I: IntoIterator<Item = Hotel>,
{
    hotels.into_iter().filter(is_display_eligible).collect()
}
