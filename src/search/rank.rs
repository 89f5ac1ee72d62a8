//! Result ranking.

use std::cmp::Ordering;

use crate::models::Hotel;
use crate::search::info_score;

/// Order hotels by information score, then star rating, both descending.
///
/// The sort is stable: hotels with equal score and equal rating keep their
/// input order. Unknown or unparsable stars compare as 0.
pub fn rank_hotels(hotels: Vec<Hotel>) -> Vec<Hotel> {
    let mut keyed: Vec<_> = hotels
        .into_iter()
        .map(|hotel| (info_score(&hotel), hotel.star_rating().unwrap_or(0.0), hotel))
        .collect();

    keyed.sort_by(|(score_a, stars_a, _), (score_b, stars_b, _)| {
        score_b
            .cmp(score_a)
            .then_with(|| compare_stars_desc(*stars_a, *stars_b))
    });

    tracing::trace!("Ranked {} hotels", keyed.len());
    keyed.into_iter().map(|(_, _, hotel)| hotel).collect()
}

fn compare_stars_desc(a: f64, b: f64) -> Ordering {
    // total_cmp separates 0.0 from -0.0; a "-0" rating must tie with "0".
    let normalize = |v: f64| if v == 0.0 { 0.0 } else { v };
    normalize(b).total_cmp(&normalize(a))
}
