//! Client for the crop registration and content-generation backend

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    CropRecord, RecommendationRequest, RecommendationResponse, RegisterOutcome, RegisterResponse,
};

use crate::error::{AppError, AppResult};

/// Operations offered by the recommendation backend
#[async_trait]
pub trait CropApi: Send + Sync {
    /// `POST /register`
    async fn register(&self, record: &CropRecord) -> AppResult<RegisterOutcome>;

    /// `POST /generate-content`, returning the narrative text
    async fn generate_content(&self, request: &RecommendationRequest) -> AppResult<String>;
}

/// HTTP client for the backend
///
/// No timeout is configured; the transport default bounds latency.
#[derive(Clone)]
pub struct CropApiClient {
    client: Client,
    base_url: String,
}

impl CropApiClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl CropApi for CropApiClient {
    async fn register(&self, record: &CropRecord) -> AppResult<RegisterOutcome> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::RegistrationFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RegistrationFailed(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let body: RegisterResponse = response.json().await.map_err(|e| {
            AppError::RegistrationFailed(format!("Failed to parse response: {}", e))
        })?;

        Ok(body.into())
    }

    async fn generate_content(&self, request: &RecommendationRequest) -> AppResult<String> {
        let response = self
            .client
            .post(self.url("/generate-content"))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::RecommendationFailed(format!("Request failed: {}", e)))?;

        // Anything but a plain 200 counts as failure
        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RecommendationFailed(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let body: RecommendationResponse = response.json().await.map_err(|e| {
            AppError::RecommendationFailed(format!("Failed to parse response: {}", e))
        })?;

        Ok(body.content)
    }
}
