//! Personal Platform API.
//!
//! A small HTTP service exposing a health check, a service descriptor and a
//! generation request intake endpoint, with static files served from a public
//! directory and structured JSON errors for everything else.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ErrorBody};
pub use crate::http::{serve, start_server, ServerError};
pub use routes::create_router;
