//! Service descriptor served at the root path.

use axum::Json;
use serde::Serialize;

use crate::config::{GENERATE_PATH, HEALTH_PATH, SERVICE_TITLE, SERVICE_VERSION};

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub generate: &'static str,
}

/// The descriptor is constant; nothing in it depends on the request or time.
pub const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    message: SERVICE_TITLE,
    version: SERVICE_VERSION,
    endpoints: Endpoints {
        health: HEALTH_PATH,
        generate: GENERATE_PATH,
    },
};

pub async fn index() -> Json<ServiceDescriptor> {
    Json(DESCRIPTOR)
}
