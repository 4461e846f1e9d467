//! API error types and their HTTP rendering.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use binwatch_core::StoreError;
use serde::{Deserialize, Serialize};

use crate::insight::InsightError;

/// Failures a handler can report.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Status update for a bin that does not exist.
    #[error("Bin not found")]
    BinNotFound,
    /// An external dependency has no credentials.
    #[error("API key not configured")]
    Unconfigured,
    /// The generative-text API could not be reached or answered garbage.
    #[error("Failed to call Gemini API")]
    Upstream,
    /// The request body was not the JSON the endpoint expects.
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),
    /// A dashboard page template could not be read.
    #[error("Error loading page")]
    PageUnavailable,
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BinNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Unconfigured | ApiError::Upstream | ApiError::PageUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::PageUnavailable => (status, self.to_string()).into_response(),
            _ => {
                let body = ErrorBody {
                    error: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BinNotFound(_) => ApiError::BinNotFound,
        }
    }
}

impl From<InsightError> for ApiError {
    fn from(err: InsightError) -> Self {
        match err {
            InsightError::Unconfigured => ApiError::Unconfigured,
            InsightError::Upstream(_) => ApiError::Upstream,
        }
    }
}
