//! OpenStreetMap Overpass source.
//!
//! Queries the Overpass interpreter for hotels inside the area named like the
//! requested city and maps OSM tags onto [`Hotel`] records.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{Hotel, HotelBuilder, Query, SearchResponse};
use crate::sources::{HotelSource, SourceError};
use crate::utils::{format_for_display, HttpClient};

/// Public Overpass interpreter endpoint
pub const OVERPASS_API_URL: &str = "https://overpass-api.de/api/interpreter";

/// Elements inspected per response
const MAX_ELEMENTS: usize = 20;

/// Hotels returned per search
const MAX_HOTELS: usize = 10;

/// OpenStreetMap Overpass source
#[derive(Debug, Clone)]
pub struct OverpassSource {
    client: HttpClient,
    endpoint: String,
}

impl OverpassSource {
    pub fn new(client: HttpClient) -> Self {
        Self::with_endpoint(client, OVERPASS_API_URL)
    }

    /// Use a different interpreter (a mirror, or a test server)
    pub fn with_endpoint(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, query: String) -> Result<reqwest::Response, SourceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach Overpass: {}", e)))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        Ok(response)
    }
}

#[async_trait]
impl HotelSource for OverpassSource {
    fn id(&self) -> &str {
        "overpass"
    }

    fn name(&self) -> &str {
        "OpenStreetMap Overpass"
    }

    async fn search(&self, query: &Query) -> Result<SearchResponse, SourceError> {
        let city = query.city();

        let mut response = self.post(area_query(city)).await?;
        if !response.status().is_success() {
            tracing::debug!(
                "Overpass area query returned {}, trying English name",
                response.status()
            );
            response = self.post(english_name_query(city)).await?;
        }

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "Overpass API returned status: {}",
                response.status()
            )));
        }

        let data: OverpassResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse Overpass JSON: {}", e)))?;

        let hotels = hotels_from_elements(data.elements, city);
        tracing::debug!("Overpass returned {} hotels for {}", hotels.len(), city);

        Ok(SearchResponse::new(hotels)
            .location(format_for_display(query.country()), format_for_display(city)))
    }
}

/// Hotels and hotel buildings in a city, town or village matching `city`.
fn area_query(city: &str) -> String {
    format!(
        r#"[out:json][timeout:25];
area["name"~"^{city}$",i]["place"~"city|town|village"]->.searchArea;
(
    way["tourism"="hotel"](area.searchArea);
    node["tourism"="hotel"](area.searchArea);
    way["building"="hotel"](area.searchArea);
    node["building"="hotel"](area.searchArea);
);
out body center qt;"#,
        city = regex_literal(city)
    )
}

/// Fallback for cities typed by their English name.
fn english_name_query(city: &str) -> String {
    format!(
        r#"[out:json][timeout:25];
area["name:en"~"{city}",i]["place"~"city|town"]->.searchArea;
(
    nwr["tourism"="hotel"](area.searchArea);
    nwr["building"="hotel"](area.searchArea);
);
out body center qt;"#,
        city = regex_literal(city)
    )
}

/// Escape `text` for use as a literal inside an OverpassQL quoted regex.
fn regex_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\' => {
                // one backslash for the regex, doubled for the string literal
                escaped.push_str("\\\\");
                escaped.push(c);
            }
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn hotels_from_elements(elements: Vec<OverpassElement>, city: &str) -> Vec<Hotel> {
    elements
        .into_iter()
        .take(MAX_ELEMENTS)
        .filter_map(|element| hotel_from_tags(&element.tags, city))
        .take(MAX_HOTELS)
        .collect()
}

/// Map OSM tags to a hotel. Unnamed elements and elements with neither a
/// website nor an address are skipped.
fn hotel_from_tags(tags: &HashMap<String, String>, city: &str) -> Option<Hotel> {
    let tag = |key: &str| {
        tags.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };
    let first_of = |keys: &[&str]| keys.iter().find_map(|&k| tag(k));

    let name = tag("name")?;

    let street = [tag("addr:street"), tag("addr:housenumber")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let address = if street.is_empty() {
        first_of(&["addr:full", "address"])
            .unwrap_or(city)
            .to_string()
    } else {
        street
    };

    let website = first_of(&["website", "contact:website", "url"]);
    if website.is_none() && address.trim().is_empty() {
        return None;
    }

    let mut builder = HotelBuilder::new().name(name).address(address);
    if let Some(website) = website {
        builder = builder.website(website);
    }
    if let Some(booking) = first_of(&["booking:url", "contact:booking", "url:booking"]) {
        builder = builder.booking_url(booking);
    }
    if let Some(phone) = first_of(&["phone", "contact:phone"]) {
        builder = builder.phone(phone);
    }
    if let Some(stars) = tag("stars") {
        builder = builder.stars(stars);
    }

    Some(builder.build())
}

// ===== Overpass API Types =====

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parse_query;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_tag_mapping() {
        let hotel = hotel_from_tags(
            &tags(&[
                ("name", "Hotel Adlon"),
                ("addr:street", "Unter den Linden"),
                ("addr:housenumber", "77"),
                ("contact:website", "https://adlon.example.com"),
                ("url:booking", "https://book.example.com/adlon"),
                ("contact:phone", "+49 30 2261 0"),
                ("stars", "5"),
            ]),
            "berlin",
        )
        .unwrap();

        assert_eq!(hotel.name.as_deref(), Some("Hotel Adlon"));
        assert_eq!(hotel.address.as_deref(), Some("Unter den Linden 77"));
        assert_eq!(hotel.website.as_deref(), Some("https://adlon.example.com"));
        assert_eq!(hotel.booking_url.as_deref(), Some("https://book.example.com/adlon"));
        assert_eq!(hotel.phone.as_deref(), Some("+49 30 2261 0"));
        assert_eq!(hotel.stars.as_deref(), Some("5"));
    }

    #[test]
    fn test_address_fallbacks() {
        let full = hotel_from_tags(&tags(&[("name", "A"), ("addr:full", "1 Road")]), "paris").unwrap();
        assert_eq!(full.address.as_deref(), Some("1 Road"));

        let only_number =
            hotel_from_tags(&tags(&[("name", "B"), ("addr:housenumber", "12")]), "paris").unwrap();
        assert_eq!(only_number.address.as_deref(), Some("12"));

        let city = hotel_from_tags(&tags(&[("name", "C")]), "paris").unwrap();
        assert_eq!(city.address.as_deref(), Some("paris"));
        assert!(city.website.is_none());
        assert!(city.stars.is_none());
    }

    #[test]
    fn test_unnamed_elements_are_skipped() {
        assert!(hotel_from_tags(&tags(&[("website", "https://x.example.com")]), "paris").is_none());
        assert!(hotel_from_tags(&tags(&[("name", "  ")]), "paris").is_none());
    }

    #[test]
    fn test_no_website_and_no_address_is_skipped() {
        assert!(hotel_from_tags(&tags(&[("name", "Ghost")]), "").is_none());
    }

    #[test]
    fn test_element_and_hotel_caps() {
        let named = |i: usize| OverpassElement {
            tags: tags(&[("name", format!("Hotel {}", i).as_str())]),
        };
        let unnamed = || OverpassElement {
            tags: HashMap::new(),
        };

        let many: Vec<_> = (0..30).map(named).collect();
        assert_eq!(hotels_from_elements(many, "rome").len(), MAX_HOTELS);

        // only the first 20 elements are inspected
        let mut sparse: Vec<_> = (0..19).map(|_| unnamed()).collect();
        sparse.extend((0..5).map(named));
        assert_eq!(hotels_from_elements(sparse, "rome").len(), 1);
    }

    #[test]
    fn test_query_escaping() {
        assert_eq!(regex_literal("St. Petersburg"), r"St\\. Petersburg");
        assert_eq!(regex_literal(r#"a"b"#), r#"a\"b"#);

        let query = area_query("new york");
        assert!(query.contains(r#"area["name"~"^new york$",i]"#));
        assert!(english_name_query("rome").contains(r#"["name:en"~"rome",i]"#));
    }

    #[tokio::test]
    async fn test_search_against_interpreter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/interpreter")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"elements": [
                    {"type": "node", "id": 1, "tags": {"name": "Hotel Roma", "website": "https://roma.example.com", "stars": "4"}},
                    {"type": "way", "id": 2, "tags": {"tourism": "hotel"}},
                    {"type": "node", "id": 3}
                ]}"#,
            )
            .create_async()
            .await;

        let source = OverpassSource::with_endpoint(
            HttpClient::new().unwrap(),
            format!("{}/api/interpreter", server.url()),
        );
        let query = parse_query("italy rome").unwrap();
        let response = source.search(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.hotels.len(), 1);
        assert_eq!(response.hotels[0].address.as_deref(), Some("rome"));
        assert_eq!(response.city.as_deref(), Some("Rome"));
        assert_eq!(response.country.as_deref(), Some("Italy"));
    }

    #[tokio::test]
    async fn test_failed_area_query_falls_back_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/interpreter")
            .with_status(504)
            .expect(2)
            .create_async()
            .await;

        let source = OverpassSource::with_endpoint(
            HttpClient::new().unwrap(),
            format!("{}/api/interpreter", server.url()),
        );
        let query = parse_query("italy rome").unwrap();
        let err = source.search(&query).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, SourceError::Api(msg) if msg.contains("504")));
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/interpreter")
            .with_status(429)
            .create_async()
            .await;

        let source = OverpassSource::with_endpoint(
            HttpClient::new().unwrap(),
            format!("{}/api/interpreter", server.url()),
        );
        let query = parse_query("italy rome").unwrap();
        assert_eq!(source.search(&query).await.unwrap_err(), SourceError::RateLimit);
    }
}
