//! API error types and their JSON wire shape.
//!
//! Handlers return [`ApiError`]; validation failures become 400 responses and
//! everything else becomes a logged 500. Faults that escape a handler entirely
//! (panics) are converted by the fault boundary in [`crate::middleware`] using
//! the same [`ErrorBody`] shape.

use axum::{
    extract::rejection::BytesRejection,
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::CACHE_CONTROL_ERROR;

/// `error` value for faults caught inside a handler
pub const INTERNAL_ERROR: &str = "Internal server error";

/// `error` value for faults caught by the fault boundary
pub const UNHANDLED_ERROR: &str = "Something went wrong!";

/// `error` value for unmatched routes
pub const NOT_FOUND_ERROR: &str = "Not found";

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            path: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Build a response with this body. Error responses are never cacheable.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (
            status,
            [(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_ERROR))],
            Json(self),
        )
            .into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required input missing; reported to the caller as-is.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    MalformedJson(#[from] serde_json::Error),

    /// Strict JSON: the top-level value must be an object or array.
    #[error("Unexpected token {0} in JSON body, expected an object or array")]
    NotJsonContainer(String),

    #[error("Failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(message) => {
                tracing::debug!(error = %message, "Rejected request");
                ErrorBody::new(message.clone())
            }
            _ => {
                tracing::error!(error = ?self, "Internal error");
                ErrorBody::new(INTERNAL_ERROR).with_message(self.to_string())
            }
        };

        body.into_response_with(status)
    }
}
