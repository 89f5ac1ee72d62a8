//! Hotel search HTTP API source.

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::models::{ApiErrorBody, Query, SearchResponse};
use crate::search::GENERIC_SEARCH_ERROR;
use crate::sources::{HotelSource, SourceError};
use crate::utils::{format_for_api, HttpClient};

/// Hotel search API client
///
/// Calls `GET {base_url}/api/search?country=..&city=..` and expects
/// `{"hotels": [...]}` back.
#[derive(Debug, Clone)]
pub struct ApiSource {
    client: HttpClient,
    base_url: Url,
}

impl ApiSource {
    pub fn new(client: HttpClient, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn search_url(&self, query: &Query) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidRequest(format!("Not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "search"]);
        url.query_pairs_mut()
            .append_pair("country", &format_for_api(query.country()))
            .append_pair("city", &format_for_api(query.city()));
        Ok(url)
    }
}

#[async_trait]
impl HotelSource for ApiSource {
    fn id(&self) -> &str {
        "api"
    }

    fn name(&self) -> &str {
        "Hotel Search API"
    }

    async fn search(&self, query: &Query) -> Result<SearchResponse, SourceError> {
        let url = self.search_url(query)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to reach search API: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_SEARCH_ERROR.to_string());
            tracing::debug!("Search API returned {}: {}", status, message);
            return Err(SourceError::Api(message));
        }

        let data: SearchResponse = serde_json::from_str(&body)?;
        tracing::debug!("Search API returned {} hotels", data.hotels.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parse_query;
    use mockito::Matcher;

    fn source_for(base_url: &str) -> ApiSource {
        ApiSource::new(HttpClient::new().unwrap(), base_url).unwrap()
    }

    #[test]
    fn test_search_url() {
        let query = parse_query("USA  New York").unwrap();

        let url = source_for("https://hotels.example.com").search_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hotels.example.com/api/search?country=usa&city=new+york"
        );

        let nested = source_for("https://example.com/widget/").search_url(&query).unwrap();
        assert_eq!(nested.path(), "/widget/api/search");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiSource::new(HttpClient::new().unwrap(), "not a url"),
            Err(SourceError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_search_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("country".into(), "france".into()),
                Matcher::UrlEncoded("city".into(), "paris".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"city": "Paris", "country": "France", "hotels": [
                    {"name": "Grand Hotel", "address": "123 Rue de Paris",
                     "website": "https://grand.example.com", "stars": "5",
                     "phone": "Нет данных"}
                ]}"#,
            )
            .create_async()
            .await;

        let query = parse_query("France Paris").unwrap();
        let response = source_for(&server.url()).search(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.hotels.len(), 1);
        assert_eq!(response.hotels[0].stars.as_deref(), Some("5"));
        assert!(response.hotels[0].phone.is_none());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"message": "slow down"}"#)
            .create_async()
            .await;

        let query = parse_query("France Paris").unwrap();
        let err = source_for(&server.url()).search(&query).await.unwrap_err();
        assert_eq!(err, SourceError::RateLimit);
    }

    #[tokio::test]
    async fn test_error_message_is_passed_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Отели не найдены"}"#)
            .create_async()
            .await;

        let query = parse_query("France Paris").unwrap();
        let err = source_for(&server.url()).search(&query).await.unwrap_err();
        assert_eq!(err, SourceError::Api("Отели не найдены".to_string()));
    }

    #[tokio::test]
    async fn test_error_without_message_uses_generic_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let query = parse_query("France Paris").unwrap();
        let err = source_for(&server.url()).search(&query).await.unwrap_err();
        assert_eq!(err, SourceError::Api(GENERIC_SEARCH_ERROR.to_string()));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let query = parse_query("France Paris").unwrap();
        let err = source_for(&server.url()).search(&query).await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let query = parse_query("France Paris").unwrap();
        let err = source_for("http://127.0.0.1:1").search(&query).await.unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }
}
