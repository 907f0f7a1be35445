//! HTTP error responses
//!
//! Unknown routes and unmatched geocoding lookups answer 404, bad query
//! parameters 400, and every other failure 500 with the error message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use city_explorer_core::{ErrorCategory, ExplorerError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Body of 400 and 500 responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

/// Body of 404 responses
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub not_found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NotFoundResponse {
    pub fn new(message: Option<String>) -> Self {
        Self {
            not_found: true,
            message,
        }
    }
}

/// Handler error wrapper converting core errors into responses
#[derive(Debug)]
pub struct ApiError(pub ExplorerError);

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        match status {
            StatusCode::NOT_FOUND => {
                warn!("{}", message);
                (status, Json(NotFoundResponse::new(Some(message)))).into_response()
            }
            StatusCode::BAD_REQUEST => {
                warn!("Rejected request: {}", message);
                (
                    status,
                    Json(ErrorResponse {
                        error: true,
                        message,
                    }),
                )
                    .into_response()
            }
            _ => {
                error!("Request failed ({}): {}", self.0.category(), message);
                (
                    status,
                    Json(ErrorResponse {
                        error: true,
                        message,
                    }),
                )
                    .into_response()
            }
        }
    }
}
