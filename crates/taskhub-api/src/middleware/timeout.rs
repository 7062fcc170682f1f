//! Request timeout layer.

use std::time::Duration;

use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

use taskhub_core::config::ServerConfig;

/// Builds a layer that answers `408 Request Timeout` when a handler runs
/// longer than the configured limit.
pub fn build_timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout_seconds),
    )
}
