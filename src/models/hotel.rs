//! Hotel model representing a single record returned by a search backend.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder strings some backends put in place of an unknown value.
///
/// These never reach a [`Hotel`]: they are turned into an absent field on the
/// way in, so every "is this known?" check is a plain presence check.
pub const NO_DATA_SENTINELS: &[&str] = &["no data", "нет данных"];

/// A hotel record from any search backend
///
/// Every field is optional. Empty strings, "no data" placeholders and values
/// that are neither text nor numbers are normalized to `None` during
/// deserialization; [`HotelBuilder`] applies the same rules to text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Hotel name
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Street address
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Official website URL
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Booking page URL
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,

    /// Contact phone number
    #[serde(default, deserialize_with = "known", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Star rating as reported by the backend (e.g. "4", "3.5", "4S")
    #[serde(default, deserialize_with = "known", skip_serializing_if = "Option::is_none")]
    pub stars: Option<String>,
}

impl Hotel {
    /// Create an empty hotel record
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric star rating, if the stored value starts with a finite number.
    ///
    /// The leading numeric prefix is used, so "4S" (superior) reads as 4.0.
    /// The stored string itself is left untouched.
    pub fn star_rating(&self) -> Option<f64> {
        self.stars.as_deref().and_then(leading_number)
    }

    /// Display name, falling back to a placeholder for unnamed records
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed hotel")
    }

    /// Check if the hotel has a booking link
    pub fn has_booking(&self) -> bool {
        self.booking_url.is_some()
    }
}

/// Builder for constructing Hotel objects
///
/// Values go through the same normalization as deserialized records.
#[derive(Debug, Clone, Default)]
pub struct HotelBuilder {
    hotel: Hotel,
}

impl HotelBuilder {
    /// Create a new builder with every field absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.hotel.name = clean_present(name.into());
        self
    }

    /// Set address
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.hotel.address = clean_present(address.into());
        self
    }

    /// Set website
    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.hotel.website = clean_present(url.into());
        self
    }

    /// Set booking URL
    pub fn booking_url(mut self, url: impl Into<String>) -> Self {
        self.hotel.booking_url = clean_present(url.into());
        self
    }

    /// Set phone
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.hotel.phone = clean_known(phone.into());
        self
    }

    /// Set star rating
    pub fn stars(mut self, stars: impl Into<String>) -> Self {
        self.hotel.stars = clean_known(stars.into());
        self
    }

    /// Build the Hotel
    pub fn build(self) -> Hotel {
        self.hotel
    }
}

/// Backends are loose about types: OSM tags are strings, hand-written
/// fixtures sometimes carry numbers. Anything else (booleans, objects,
/// arrays) only loses that one field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

impl RawValue {
    fn into_string(self) -> Option<String> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Other(_) => None,
        }
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawValue> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(RawValue::into_string).and_then(clean_present))
}

fn known<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawValue> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(RawValue::into_string).and_then(clean_known))
}

// Only the empty string is absent; whitespace is a (poor) value.
fn clean_present(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn clean_known(value: String) -> Option<String> {
    let lowered = value.trim().to_lowercase();
    if NO_DATA_SENTINELS.contains(&lowered.as_str()) {
        return None;
    }
    clean_present(value)
}

/// Parse the leading decimal number of a string, ignoring any suffix.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
