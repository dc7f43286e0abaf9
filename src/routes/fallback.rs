//! Catch-all for requests no route or static file answered.

use axum::{extract::OriginalUri, http::StatusCode, response::Response};

use crate::error::{ErrorBody, NOT_FOUND_ERROR};

/// 404 handler. Reports the path as the client sent it, before any route
/// canonicalization, without its query string.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    ErrorBody::new(NOT_FOUND_ERROR)
        .with_path(uri.path())
        .into_response_with(StatusCode::NOT_FOUND)
}
