//! HTTP server module.
//!
//! Serves the router on plain HTTP through `axum-server`, with graceful shutdown
//! on SIGTERM/SIGINT. TLS is expected to terminate in front of the service.

mod server;
mod shutdown;
pub mod static_files;

pub use server::{serve, start_server, ServerError};
