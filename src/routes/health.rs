//! Health check endpoint for container orchestration.
//!
//! A liveness check: returns 200 with a fresh timestamp whenever the process can
//! answer HTTP. Used by Cloud Run, Kubernetes and load balancers.

use axum::Json;
use serde::Serialize;

use super::timestamp;
use crate::config::SERVICE_NAME;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: timestamp(),
        service: SERVICE_NAME,
    })
}
