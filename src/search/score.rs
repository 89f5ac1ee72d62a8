//! Information-completeness scoring.

use serde::Serialize;

use crate::models::Hotel;

const NAME_WEIGHT: u32 = 1;
const ADDRESS_WEIGHT: u32 = 2;
const WEBSITE_WEIGHT: u32 = 3;
const BOOKING_WEIGHT: u32 = 2;
const PHONE_WEIGHT: u32 = 1;
const STARS_WEIGHT: u32 = 2;

/// How much useful information a hotel record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct InfoScore(u32);

impl InfoScore {
    /// Score of a record with every field filled in
    pub const MAX: InfoScore = InfoScore(
        NAME_WEIGHT + ADDRESS_WEIGHT + WEBSITE_WEIGHT + BOOKING_WEIGHT + PHONE_WEIGHT + STARS_WEIGHT,
    );

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Score a hotel by which of its fields are present.
///
/// | Field       | Weight |
/// |-------------|--------|
/// | name        | 1      |
/// | address     | 2      |
/// | website     | 3      |
/// | booking_url | 2      |
/// | phone       | 1      |
/// | stars       | 2      |
pub fn info_score(hotel: &Hotel) -> InfoScore {
    let weighted = [
        (&hotel.name, NAME_WEIGHT),
        (&hotel.address, ADDRESS_WEIGHT),
        (&hotel.website, WEBSITE_WEIGHT),
        (&hotel.booking_url, BOOKING_WEIGHT),
        (&hotel.phone, PHONE_WEIGHT),
        (&hotel.stars, STARS_WEIGHT),
    ];

    InfoScore(
        weighted
            .iter()
            .filter(|(field, _)| is_present(field))
            .map(|(_, weight)| weight)
            .sum(),
    )
}

// Records built by hand can bypass normalization, so `Some("")` is absent too.
fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}
