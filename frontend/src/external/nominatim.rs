//! Nominatim reverse geocoding client
//!
//! Turns a coordinate pair into a human readable place name through the
//! OpenStreetMap `/reverse` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use shared::{Coordinates, ReverseGeocodeResponse};

use crate::error::{AppError, AppResult};

/// A reverse geocoding lookup
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, at: Coordinates) -> AppResult<ReverseGeocodeResponse>;
}

/// Nominatim API client
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client identifying itself with `user_agent`
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Configuration(format!("Invalid geocoding client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, at: Coordinates) -> AppResult<ReverseGeocodeResponse> {
        let response = self
            .client
            .get(self.reverse_url())
            .query(&[
                ("lat", at.lat.to_string()),
                ("lon", at.lng.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::GeocodingFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GeocodingFailed(format!(
                "Nominatim returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GeocodingFailed(format!("Failed to parse response: {}", e)))
    }
}
