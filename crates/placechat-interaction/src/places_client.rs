//! Reference implementation of the place-search collaborator against a
//! text-search REST endpoint.
//!
//! The request goes out with the free-text query and the API key; the
//! response's `results` array is mapped into [`BusinessRecord`]s. The core
//! treats this client as a black box behind the [`PlaceSearch`] trait.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use placechat_core::business::BusinessRecord;
use placechat_core::error::PlacechatError;
use placechat_core::gateway::PlaceSearch;

use crate::config;

const BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the places text-search REST API.
#[derive(Clone)]
pub struct PlacesApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PlacesApiClient {
    /// Creates a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads configuration from secret.json or the `PLACES_API_KEY`
    /// environment variable.
    pub fn try_from_env() -> Result<Self, PlacechatError> {
        let api_key = config::resolve_places_api_key().ok_or_else(|| {
            PlacechatError::config(
                "PLACES_API_KEY not found in ~/.config/placechat/secret.json or environment variables",
            )
        })?;
        Ok(Self::new(api_key))
    }

    /// Overrides the endpoint, for proxies.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl PlaceSearch for PlacesApiClient {
    async fn search(&self, query: &str) -> Result<Vec<BusinessRecord>, PlacechatError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(PlacechatError::search_failed("Search query cannot be empty"));
        }

        tracing::debug!(query = trimmed, "sending text search request");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", trimmed), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|err| {
                PlacechatError::search_failed(format!("Places request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read places error body".to_string());
            return Err(map_http_error(status, body));
        }

        let payload: TextSearchResponse = response.json().await.map_err(|err| {
            PlacechatError::search_failed(format!("Failed to parse places response: {err}"))
        })?;

        if let Some(status) = payload.status.as_deref() {
            // The places API reports request-level failures in the body.
            if status != "OK" && status != "ZERO_RESULTS" {
                let detail = payload.error_message.unwrap_or_default();
                return Err(PlacechatError::search_failed(format!(
                    "Places API returned {status}: {detail}"
                )));
            }
        }

        Ok(payload
            .results
            .into_iter()
            .map(PlaceResult::into_record)
            .collect())
    }
}

fn map_http_error(status: StatusCode, body: String) -> PlacechatError {
    PlacechatError::search_failed(format!("Places API returned {status}: {body}"))
}

#[derive(Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Deserialize, Default)]
struct Geometry {
    #[serde(default)]
    location: Location,
}

#[derive(Deserialize, Default)]
struct Location {
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lng: f64,
}

impl PlaceResult {
    // TODO: fetch phone and website via a Place Details request.
    fn into_record(self) -> BusinessRecord {
        let location = self.geometry.unwrap_or_default().location;
        BusinessRecord {
            place_id: self.place_id,
            name: self.name,
            address: self.formatted_address.unwrap_or_default(),
            rating: self.rating,
            latitude: location.lat,
            longitude: location.lng,
            distance: None,
            phone: None,
            website: None,
            logo: self.icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_mapping() {
        let payload: TextSearchResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [{
                    "place_id": "abc123",
                    "name": "Blue Bottle Coffee",
                    "formatted_address": "66 Mint St, San Francisco, CA",
                    "rating": 4.5,
                    "geometry": {"location": {"lat": 37.78, "lng": -122.41}},
                    "icon": "https://example.com/cafe.png"
                }]
            }"#,
        )
        .unwrap();

        let records: Vec<BusinessRecord> = payload
            .results
            .into_iter()
            .map(PlaceResult::into_record)
            .collect();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.place_id, "abc123");
        assert_eq!(record.name, "Blue Bottle Coffee");
        assert_eq!(record.address, "66 Mint St, San Francisco, CA");
        assert_eq!(record.rating, Some(4.5));
        assert_eq!(record.latitude, 37.78);
        assert!(record.distance.is_none());
        assert_eq!(record.logo.as_deref(), Some("https://example.com/cafe.png"));
    }

    #[test]
    fn test_sparse_result_mapping_fills_defaults() {
        let payload: TextSearchResponse = serde_json::from_str(
            r#"{"results": [{"place_id": "x", "name": "Nameless Deli"}]}"#,
        )
        .unwrap();
        let record = payload
            .results
            .into_iter()
            .map(PlaceResult::into_record)
            .next()
            .unwrap();
        assert_eq!(record.address, "");
        assert!(record.rating.is_none());
        assert_eq!(record.latitude, 0.0);
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_network_call() {
        let client = PlacesApiClient::new("test-key");
        let err = client.search("  ").await.unwrap_err();
        assert!(err.is_search_failed());
    }
}
