//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderName, Request, StatusCode};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tower::ServiceExt;

use taskhub_api::{AppState, build_app};
use taskhub_auth::{PasswordHasher, PasswordPolicy};
use taskhub_core::config::AppConfig;
use taskhub_core::types::UserId;
use taskhub_database::Stores;
use taskhub_entity::user::CreateUser;

/// Test application context
pub struct TestApp {
    /// The full application, middleware included
    pub router: Router,
    /// Stores behind the router, for direct setup and inspection
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with empty in-memory stores
    pub fn new() -> Self {
        let config =
            AppConfig::from_file("tests/fixtures/test_config").expect("Failed to load test config");
        let policy =
            PasswordPolicy::from_config(&config.auth.password).expect("Failed to load policy");
        let stores = Stores::memory();

        let router = build_app(AppState::new(config.clone(), stores.clone(), policy));

        Self {
            router,
            stores,
            config,
        }
    }

    /// Insert an active user directly into the store
    pub async fn create_test_user(&self, username: &str, password: &str) -> UserId {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");

        self.stores
            .users
            .create(&CreateUser {
                username: username.to_string(),
                first_name: String::new(),
                last_name: String::new(),
                email: format!("{username}@example.com"),
                password_hash: hash,
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Log in through the form and return the session cookie pair
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post(
                "/prijava/",
                &[("username", username), ("password", password)],
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::SEE_OTHER,
            "Login failed: {}",
            response.body
        );

        response.cookie().expect("No session cookie in login response")
    }

    /// GET a page
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.send("GET", path, String::new(), cookie).await
    }

    /// POST a urlencoded form
    pub async fn post(&self, path: &str, form: &[(&str, &str)], cookie: Option<&str>) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, NON_ALPHANUMERIC),
                    utf8_percent_encode(v, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        self.send("POST", path, body, cookie).await
    }

    async fn send(&self, method: &str, path: &str, body: String, cookie: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");

        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let location = header(LOCATION);
        let set_cookie = header(SET_COOKIE);

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            location,
            set_cookie,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Redirect target
    pub location: Option<String>,
    /// Raw `Set-Cookie` header
    pub set_cookie: Option<String>,
    /// Response body as text
    pub body: String,
}

impl TestResponse {
    /// The `name=value` part of `Set-Cookie`, if it carries a value.
    pub fn cookie(&self) -> Option<String> {
        let pair = self.set_cookie.as_deref()?.split(';').next()?;
        let (_, value) = pair.split_once('=')?;
        (!value.is_empty()).then(|| pair.to_string())
    }

    /// Assert a redirect to `target`.
    pub fn assert_redirect(&self, target: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(target));
    }
}
