//! HTTP client for the Google Maps Geocoding API.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::GeoPoint;

const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Resolves free-text addresses to coordinates.
///
/// The API key is injected at construction time rather than read from the
/// environment here; the binary owns that lookup.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GeocodeClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("school-districts/0.1")
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_key })
    }

    /// Geocode a single address.
    ///
    /// Returns `Ok(None)` when the provider has no result for the address.
    /// Transport errors and non-OK API statuses other than `ZERO_RESULTS`
    /// (invalid key, quota exceeded) are fatal and propagate to the caller.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>> {
        let response = self
            .client
            .get(GEOCODE_ENDPOINT)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Geocoding request failed for '{}'", address))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Geocoding request for '{}' returned HTTP {}",
                address,
                response.status()
            );
        }

        let payload: GeocodeResponse = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        match payload.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                debug!("No geocoding result for '{}'", address);
                return Ok(None);
            }
            status => {
                anyhow::bail!(
                    "Geocoding API error {}: {}",
                    status,
                    payload.error_message.as_deref().unwrap_or("no message")
                );
            }
        }

        Ok(point_from_payload(payload))
    }
}

/// Extract the first result's location, if the payload carries one.
fn point_from_payload(payload: GeocodeResponse) -> Option<GeoPoint> {
    let location = payload.results.into_iter().next()?.geometry?.location?;
    Some(GeoPoint {
        lon: location.lng,
        lat: location.lat,
    })
}
