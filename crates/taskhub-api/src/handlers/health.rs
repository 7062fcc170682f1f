//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if let Some(pool) = state.stores.pool() {
        match pool.health_check().await {
            Ok(true) => {}
            Ok(false) => return (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                return (StatusCode::SERVICE_UNAVAILABLE, "unavailable");
            }
        }
    }
    (StatusCode::OK, "ok")
}
