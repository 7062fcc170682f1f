//! Route table.

use axum::Router;
use axum::routing::get;

use taskhub_core::error::AppError;

use crate::error::ApiError;
use crate::handlers::{auth, health, task};
use crate::state::AppState;

/// Builds the router with every page of the application.
///
/// Paths keep their trailing slash; forms post back to the same URL they
/// are served from.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Authentication
        .route("/prijava/", get(auth::login_form).post(auth::login))
        .route("/odjava/", get(auth::logout).post(auth::logout))
        .route(
            "/registracija/",
            get(auth::register_form).post(auth::register),
        )
        .route(
            "/spremeni-geslo/",
            get(auth::password_form).post(auth::change_password),
        )
        // Tasks
        .route("/", get(task::list))
        .route("/opravilo/{id}/", get(task::detail))
        .route(
            "/ustvari-opravilo/",
            get(task::create_form).post(task::create),
        )
        .route(
            "/posodobi-opravilo/{id}/",
            get(task::edit_form).post(task::update),
        )
        .route(
            "/izbrisi-opravilo/{id}/",
            get(task::delete_form).post(task::delete),
        )
        // Probes
        .route("/health", get(health::health))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    AppError::not_found("No route matches the request").into()
}
