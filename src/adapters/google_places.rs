//! Places capability backed by the Google Places web service JSON endpoints.

use crate::domain::model::{
    AutocompleteRequest, LatLng, LocationBias, NearbySearchRequest, Place, Prediction,
    TextSearchRequest,
};
use crate::domain::ports::PlacesProvider;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

#[derive(Debug, Deserialize)]
struct PlacesEnvelope<T> {
    status: String,
    error_message: Option<String>,
    #[serde(default = "Vec::new", alias = "predictions")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: String,
    formatted_address: Option<String>,
    vicinity: Option<String>,
    geometry: Option<Geometry>,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PredictionResult {
    description: String,
    place_id: Option<String>,
}

impl From<PlaceResult> for Place {
    fn from(result: PlaceResult) -> Self {
        Place {
            name: result.name,
            formatted_address: result.formatted_address.or(result.vicinity),
            location: result.geometry.map(|g| g.location),
            id: result.place_id,
        }
    }
}

impl From<PredictionResult> for Prediction {
    fn from(result: PredictionResult) -> Self {
        Prediction {
            description: result.description,
            place_id: result.place_id,
        }
    }
}

pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Vec<(&str, String)>,
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        tracing::debug!("📡 Places request: {} {:?}", url, params);

        let mut request = self
            .client
            .get(&url)
            .query(&params)
            .query(&[("key", self.api_key.as_str())]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        tracing::debug!("📡 Places response status: {}", response.status());

        if !response.status().is_success() {
            return Err(FinderError::ProviderStatus {
                status: format!("HTTP {}", response.status().as_u16()),
                message: None,
            });
        }

        let envelope: PlacesEnvelope<T> = response.json().await?;
        match envelope.status.as_str() {
            "OK" => Ok(envelope.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => {
                tracing::error!(
                    "❌ Places service status {}: {}",
                    envelope.status,
                    envelope.error_message.as_deref().unwrap_or("no details")
                );
                Err(FinderError::ProviderStatus {
                    status: envelope.status,
                    message: envelope.error_message,
                })
            }
        }
    }
}

fn push_bias(params: &mut Vec<(&str, String)>, bias: Option<LocationBias>) {
    if let Some(bias) = bias {
        params.push(("location", bias.center.to_string()));
        params.push(("radius", bias.radius_m.to_string()));
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn text_search(&self, request: &TextSearchRequest) -> Result<Vec<Place>> {
        let mut params = vec![("query", request.query.clone())];
        if let Some(category) = &request.category {
            params.push(("type", category.clone()));
        }
        push_bias(&mut params, request.bias);

        let results: Vec<PlaceResult> = self.fetch("textsearch", params).await?;
        Ok(results.into_iter().map(Place::from).collect())
    }

    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<Vec<Place>> {
        let params = vec![
            ("location", request.location.to_string()),
            ("radius", request.radius_m.to_string()),
            ("type", request.category.clone()),
        ];

        let results: Vec<PlaceResult> = self.fetch("nearbysearch", params).await?;
        Ok(results.into_iter().map(Place::from).collect())
    }

    async fn autocomplete(&self, request: &AutocompleteRequest) -> Result<Vec<Prediction>> {
        let mut params = vec![("input", request.input.clone())];
        push_bias(&mut params, request.bias);

        let results: Vec<PredictionResult> = self.fetch("autocomplete", params).await?;
        Ok(results.into_iter().map(Prediction::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_result_uses_vicinity_as_address() {
        let raw = serde_json::json!({
            "status": "OK",
            "results": [
                {"name": "Felfela", "vicinity": "15 Hoda Shaarawy", "place_id": "abc",
                 "geometry": {"location": {"lat": 30.05, "lng": 31.24}}},
                {"name": "No Geometry"}
            ]
        });

        let envelope: PlacesEnvelope<PlaceResult> = serde_json::from_value(raw).unwrap();
        let places: Vec<Place> = envelope.results.into_iter().map(Place::from).collect();

        assert_eq!(places[0].formatted_address.as_deref(), Some("15 Hoda Shaarawy"));
        assert_eq!(places[0].location, Some(LatLng::new(30.05, 31.24)));
        assert_eq!(places[0].id.as_deref(), Some("abc"));
        assert!(places[1].location.is_none());
    }

    #[test]
    fn test_error_envelope_without_results() {
        let raw = serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        });

        let envelope: PlacesEnvelope<PlaceResult> = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.status, "REQUEST_DENIED");
        assert!(envelope.results.is_empty());
    }
}
