//! Static file serving from the public directory.
//!
//! Static files are the last stop before the 404 responder: a request no API
//! route matched is looked up on disk, and if no file exists (or the method is
//! not GET/HEAD) the JSON not-found handler answers instead.

use axum::{handler::HandlerWithoutStateExt, Router};
use tower_http::services::ServeDir;

use crate::config::StaticFilesConfig;
use crate::routes::fallback::not_found;

/// Create a router whose fallback serves files from `config.dir`.
///
/// The directory does not need to exist; every lookup then ends in the 404
/// handler.
pub fn create_static_router(config: &StaticFilesConfig) -> Router {
    let serve_dir = ServeDir::new(&config.dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new().fallback_service(serve_dir)
}
