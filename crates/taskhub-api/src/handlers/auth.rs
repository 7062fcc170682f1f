//! Auth handlers: login, logout, registration, password change.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use validator::Validate;

use taskhub_core::config::SessionConfig;
use taskhub_core::error::{AppError, ErrorKind};
use taskhub_service::form::FormErrors;

use crate::dto::request::form_errors;
use crate::dto::{LoginForm, NextQuery, PasswordChangeForm, RegisterForm};
use crate::error::ApiError;
use crate::extractors::{AuthUser, session_token};
use crate::state::AppState;
use crate::views::{self, LOGIN_PATH, safe_next};

use super::form_errors_or;

/// GET /prijava/
pub async fn login_form(Query(query): Query<NextQuery>) -> Response {
    let next = safe_next(query.next.as_deref());
    views::auth::login_page("", next, &FormErrors::new()).into_response()
}

/// POST /prijava/
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let next = safe_next(form.next.as_deref());

    if let Err(errors) = form.validate() {
        return Ok(views::auth::login_page(&form.username, next, &form_errors(&errors)).into_response());
    }

    match state
        .session_manager
        .login(&form.username, &form.password)
        .await
    {
        Ok(result) => Ok(with_session_cookie(
            state.session_manager.config(),
            &result.token,
            Redirect::to(next),
        )),
        Err(err) if err.kind == ErrorKind::Authentication => {
            let mut errors = FormErrors::new();
            errors.add("__all__", err.message);
            Ok(views::auth::login_page(&form.username, next, &errors).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET or POST /odjava/
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let config = state.session_manager.config();
    if let Some(token) = session_token(&headers, &config.cookie_name) {
        state.session_manager.logout(&token).await?;
    }
    let mut response = Redirect::to(LOGIN_PATH).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, header_value(clear_cookie(config))?);
    Ok(response)
}

/// GET /registracija/
pub async fn register_form(State(state): State<AppState>) -> Response {
    let help = state.account_service.password_help_texts();
    views::auth::register_page("", &FormErrors::new(), &help).into_response()
}

/// POST /registracija/
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ApiError> {
    let help = state.account_service.password_help_texts();

    if let Err(errors) = form.validate() {
        return Ok(
            views::auth::register_page(&form.username, &form_errors(&errors), &help).into_response(),
        );
    }

    let user = match state
        .account_service
        .register(&form.username, &form.password, &form.password_confirmation)
        .await
    {
        Ok(user) => user,
        Err(err) => {
            let errors = form_errors_or(err)?;
            return Ok(views::auth::register_page(&form.username, &errors, &help).into_response());
        }
    };

    let (token, _) = state.session_manager.create_for_user(user.id).await?;
    Ok(with_session_cookie(
        state.session_manager.config(),
        &token,
        Redirect::to("/"),
    ))
}

/// GET /spremeni-geslo/
pub async fn password_form(State(state): State<AppState>, auth: AuthUser) -> Response {
    let help = state.account_service.password_help_texts();
    views::auth::password_change_page(&auth.username, &FormErrors::new(), &help).into_response()
}

/// POST /spremeni-geslo/
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<PasswordChangeForm>,
) -> Result<Response, ApiError> {
    match state
        .account_service
        .change_password(
            auth.context(),
            &form.current_password,
            &form.password,
            &form.password_confirmation,
        )
        .await
    {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            let errors = form_errors_or(err)?;
            let help = state.account_service.password_help_texts();
            Ok(views::auth::password_change_page(&auth.username, &errors, &help).into_response())
        }
    }
}

/// `Set-Cookie` value opening a session.
pub fn session_cookie(config: &SessionConfig, token: &str) -> String {
    let max_age = config.lifetime_hours * 3600;
    let secure = if config.secure_cookie { "; Secure" } else { "" };
    format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}",
        config.cookie_name
    )
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    )
}

fn with_session_cookie(config: &SessionConfig, token: &str, redirect: Redirect) -> Response {
    match header_value(session_cookie(config, token)) {
        Ok(value) => ([(SET_COOKIE, value)], redirect).into_response(),
        Err(err) => err.into_response(),
    }
}

fn header_value(value: String) -> Result<HeaderValue, ApiError> {
    HeaderValue::try_from(value).map_err(|e| {
        ApiError(AppError::with_source(
            ErrorKind::Internal,
            "Invalid cookie header",
            e,
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::default();
        assert_eq!(
            session_cookie(&config, "abc"),
            "taskhub_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=1209600"
        );

        let secure = SessionConfig {
            secure_cookie: true,
            ..SessionConfig::default()
        };
        assert!(session_cookie(&secure, "abc").ends_with("; Secure"));
        assert_eq!(
            clear_cookie(&config),
            "taskhub_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }
}
