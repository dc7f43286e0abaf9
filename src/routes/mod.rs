//! HTTP route handlers and router assembly.
//!
//! Requests flow through an ordered fallback chain: the API routes first, then
//! static files, then the JSON 404 responder. The whole chain runs inside the
//! fault boundary (a panic-catching layer) and the request ID span.
//!
//! Route matching ignores ASCII case and a single trailing slash, so
//! `/HEALTH` and `/health/` reach the health check. Static file lookups and the
//! 404 path see the request exactly as sent.
//!
//! Every response gets a Cache-Control header: `no-store` for the API and for
//! errors, a revalidating policy for static assets.

pub mod fallback;
pub mod generate;
pub mod health;
pub mod index;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::Uri,
    middleware,
    routing::{get, post},
    Router,
};
use chrono::{SecondsFormat, Utc};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{
    AppConfig, CACHE_CONTROL_API, CACHE_CONTROL_STATIC, GENERATE_PATH, HEALTH_PATH, INDEX_PATH,
    ROUTE_PATHS,
};
use crate::http::static_files::create_static_router;
use crate::middleware::{fault_response, request_id_layer};

/// Current time as ISO-8601 UTC with millisecond precision, e.g.
/// `2024-05-01T12:34:56.789Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Creates the Axum router with all routes, fallbacks and layers.
pub fn create_router(config: &AppConfig) -> Router {
    // API - never cached; a known path with the wrong method is a 404
    let api_routes = Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route(INDEX_PATH, get(index::index))
        .route(GENERATE_PATH, post(generate::generate))
        .method_not_allowed_fallback(fallback::not_found)
        .layer(DefaultBodyLimit::max(config.http.body_limit_bytes))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_API),
        ));

    // Static files - consulted only when no API route matched
    let static_routes = create_static_router(&config.static_files).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ),
    );

    // The rewrite must run before routing, so it wraps the routed app as the
    // fallback of an outer router. That outer router also records the
    // original URI for the 404 handler.
    let app = Router::new()
        .fallback_service(api_routes.merge(static_routes))
        .layer(middleware::map_request(canonicalize_route));

    with_fault_boundary(app)
}

/// Rewrite the request path to its canonical API route, if it names one.
async fn canonicalize_route(mut request: Request) -> Request {
    if let Some(uri) = canonical_route_uri(request.uri()) {
        tracing::debug!(from = %request.uri().path(), to = %uri.path(), "Canonicalized route");
        *request.uri_mut() = uri;
    }
    request
}

/// The URI with its path replaced by the matching entry of [`ROUTE_PATHS`].
///
/// Matching is ASCII case-insensitive and tolerates one trailing slash.
/// Returns `None` when nothing matches or the path is already canonical.
fn canonical_route_uri(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let trimmed = match path.strip_suffix('/') {
        Some(p) if !p.is_empty() && !p.ends_with('/') => p,
        _ => path,
    };

    let route = ROUTE_PATHS
        .iter()
        .find(|route| route.eq_ignore_ascii_case(trimmed))?;
    if *route == path {
        return None;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", route, query),
        None => route.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// Wrap `router` in the fault boundary and the request ID middleware.
///
/// The request ID layer is outermost so its span and completion log cover
/// responses produced by the fault boundary too.
pub fn with_fault_boundary(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(fault_response))
        .layer(middleware::from_fn(request_id_layer))
}
