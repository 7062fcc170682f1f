//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use axum::middleware;
use tower_http::trace::TraceLayer;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::timeout::build_timeout_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = build_timeout_layer(&state.config.server);

    build_router(state)
        .layer(middleware::from_fn(request_logging))
        .layer(timeout)
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
}
