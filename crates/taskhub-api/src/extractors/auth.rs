//! `AuthUser` extractor: resolves the session cookie into a request context.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use taskhub_core::error::AppError;
use taskhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Anonymous requests are rejected with a redirect to the login page
/// that brings the user back to the requested path afterwards.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve(&parts.headers, state).await? {
            Some(ctx) => Ok(AuthUser(ctx)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                Err(AppError::authentication_required(next).into())
            }
        }
    }
}

/// Value of the session cookie, if present.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

async fn resolve(headers: &HeaderMap, state: &AppState) -> Result<Option<RequestContext>, ApiError> {
    let Some(token) = session_token(headers, &state.config.session.cookie_name) else {
        return Ok(None);
    };
    let resolved = state.session_manager.resolve(&token).await?;
    Ok(resolved.map(|(session, user)| RequestContext::new(user.id, user.username, session.id)))
}
