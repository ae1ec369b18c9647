//! Error handling for the Crop Advisor frontend
//!
//! Every error is handled at its call site; the `IntoResponse` impl only
//! covers the shell endpoints that cannot recover locally.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{StorageError, ValidationError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    // External service errors
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Recommendation failed: {0}")]
    RecommendationFailed(String),

    #[error("Geocoding failed: {0}")]
    GeocodingFailed(String),

    // Host errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownField(name) => AppError::UnknownField(name),
            other => AppError::Validation {
                field: other.field().map(|f| f.to_string()).unwrap_or_default(),
                message: other.to_string(),
            },
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::UnknownField(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_FIELD"),
            AppError::RegistrationFailed(_) => (StatusCode::BAD_GATEWAY, "REGISTRATION_FAILED"),
            AppError::RecommendationFailed(_) => {
                (StatusCode::BAD_GATEWAY, "RECOMMENDATION_FAILED")
            }
            AppError::GeocodingFailed(_) => (StatusCode::BAD_GATEWAY, "GEOCODING_FAILED"),
            AppError::Storage(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_ERROR"),
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let field = match &self {
            AppError::Validation { field, .. } if !field.is_empty() => Some(field.clone()),
            AppError::UnknownField(name) => Some(name.clone()),
            _ => None,
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let detail = ErrorDetail {
            code: code.to_string(),
            message: self.to_string(),
            field,
        };
        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
