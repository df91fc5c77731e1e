//! API error types.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload too large (413).
    #[error("Payload too large: {size} bytes (max: {max})")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Internal server error (500).
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Request ID for tracing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            request_id: None, // Will be set by middleware
            timestamp: chrono::Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

// Conversions from other error types
impl From<scrubgate_core::CoreError> for ApiError {
    fn from(e: scrubgate_core::CoreError) -> Self {
        match &e {
            scrubgate_core::CoreError::Validation(_) => Self::BadRequest(e.to_string()),
            scrubgate_core::CoreError::Data(scrubgate_core::DataError::NotFound { .. }) => {
                Self::NotFound(e.to_string())
            }
            _ => Self::Internal(e.to_string()),
        }
    }
}

impl From<scrubgate_storage::StorageError> for ApiError {
    fn from(e: scrubgate_storage::StorageError) -> Self {
        match e {
            scrubgate_storage::StorageError::NotFound(key) => Self::NotFound(key),
            scrubgate_storage::StorageError::InvalidKey(key) => {
                Self::BadRequest(format!("invalid storage key: {key}"))
            }
            scrubgate_storage::StorageError::Io(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::BadRequest(format!("Multipart error: {e}"))
    }
}
