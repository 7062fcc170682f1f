//! Integration tests for login, logout, registration, and password change.

use axum::http::StatusCode;

use crate::helpers::TestApp;

const PASSWORD: &str = "zelena-miza-42";

#[tokio::test]
async fn test_anonymous_redirected_to_login() {
    let app = TestApp::new();

    app.get("/", None).await.assert_redirect("/prijava/?next=/");
    app.get("/opravilo/5/", None)
        .await
        .assert_redirect("/prijava/?next=/opravilo/5/");
    app.get("/spremeni-geslo/", None)
        .await
        .assert_redirect("/prijava/?next=/spremeni-geslo/");
}

#[tokio::test]
async fn test_login_page_carries_next() {
    let app = TestApp::new();

    let response = app.get("/prijava/?next=/ustvari-opravilo/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"name="next" value="/ustvari-opravilo/""#));
}

#[tokio::test]
async fn test_login_success_redirects_to_next() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;

    let response = app
        .post(
            "/prijava/",
            &[
                ("username", "ana"),
                ("password", PASSWORD),
                ("next", "/ustvari-opravilo/"),
            ],
            None,
        )
        .await;

    response.assert_redirect("/ustvari-opravilo/");
    let set_cookie = response.set_cookie.as_deref().expect("session cookie");
    assert!(set_cookie.starts_with("taskhub_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let cookie = response.cookie().expect("cookie value");
    assert_eq!(app.get("/", Some(&cookie)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_ignores_external_next() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;

    let response = app
        .post(
            "/prijava/",
            &[
                ("username", "ana"),
                ("password", PASSWORD),
                ("next", "//evil.example/"),
            ],
            None,
        )
        .await;

    response.assert_redirect("/");
}

#[tokio::test]
async fn test_login_ignores_next_with_control_characters() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;

    for next in ["/\t/evil.example/", "/\n/evil.example/"] {
        let response = app
            .post(
                "/prijava/",
                &[("username", "ana"), ("password", PASSWORD), ("next", next)],
                None,
            )
            .await;

        response.assert_redirect("/");
    }
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;

    let response = app
        .post(
            "/prijava/",
            &[("username", "ana"), ("password", "napacno-geslo")],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie.is_none());
    assert!(response.body.contains("Napačno uporabniško ime ali geslo."));
    assert!(response.body.contains(r#"value="ana""#));
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new();

    let response = app
        .post(
            "/prijava/",
            &[("username", "nihce"), ("password", PASSWORD)],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Napačno uporabniško ime ali geslo."));
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new();

    let response = app.post("/prijava/", &[("username", "ana")], None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("To polje je obvezno."));
}

#[tokio::test]
async fn test_login_inactive_account() {
    let app = TestApp::new();
    let id = app.create_test_user("ana", PASSWORD).await;
    app.stores.users.set_active(id, false).await.expect("deactivate");

    let response = app
        .post(
            "/prijava/",
            &[("username", "ana"), ("password", PASSWORD)],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Račun ni v uporabi"));

    // A wrong password must not reveal the account state.
    let response = app
        .post(
            "/prijava/",
            &[("username", "ana"), ("password", "napacno-geslo")],
            None,
        )
        .await;
    assert!(!response.body.contains("Račun ni v uporabi"));
    assert!(response.body.contains("Napačno uporabniško ime ali geslo."));
}

#[tokio::test]
async fn test_deactivated_user_loses_session() {
    let app = TestApp::new();
    let id = app.create_test_user("ana", PASSWORD).await;
    let cookie = app.login("ana", PASSWORD).await;

    app.stores.users.set_active(id, false).await.expect("deactivate");

    app.get("/", Some(&cookie))
        .await
        .assert_redirect("/prijava/?next=/");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;
    let cookie = app.login("ana", PASSWORD).await;

    let response = app.post("/odjava/", &[], Some(&cookie)).await;

    response.assert_redirect("/prijava/");
    assert!(
        response
            .set_cookie
            .as_deref()
            .is_some_and(|c| c.contains("Max-Age=0"))
    );
    app.get("/", Some(&cookie))
        .await
        .assert_redirect("/prijava/?next=/");
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new();

    app.get("/odjava/", None).await.assert_redirect("/prijava/");
}

#[tokio::test]
async fn test_register_logs_in() {
    let app = TestApp::new();

    let response = app
        .post(
            "/registracija/",
            &[
                ("username", "marko"),
                ("password", PASSWORD),
                ("password_confirmation", PASSWORD),
            ],
            None,
        )
        .await;

    response.assert_redirect("/");
    let cookie = response.cookie().expect("session cookie");

    let page = app.get("/", Some(&cookie)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Nedokončana opravila: <strong>0</strong>"));
    assert!(page.body.contains("marko"));
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new();

    let response = app
        .post(
            "/registracija/",
            &[
                ("username", "marko"),
                ("password", PASSWORD),
                ("password_confirmation", "druga-miza-42"),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Gesli nista enaki!"));
    assert!(
        app.stores
            .users
            .find_by_username("marko")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn test_register_reports_every_policy_failure() {
    let app = TestApp::new();

    let response = app
        .post(
            "/registracija/",
            &[
                ("username", "marko"),
                ("password", "12345"),
                ("password_confirmation", "12345"),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Geslo je prekratko. Imeti mora vsaj 8 znakov."));
    assert!(response.body.contains("Prepogosto geslo."));
    assert!(response.body.contains("Geslo vsebuje samo števke."));
}

#[tokio::test]
async fn test_register_password_like_username() {
    let app = TestApp::new();

    let response = app
        .post(
            "/registracija/",
            &[
                ("username", "marko.novak"),
                ("password", "MarkoNovak"),
                ("password_confirmation", "MarkoNovak"),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Geslo je preveč podobno"));
}

#[tokio::test]
async fn test_register_duplicate_username_ignores_case() {
    let app = TestApp::new();
    app.create_test_user("Ana", PASSWORD).await;

    let response = app
        .post(
            "/registracija/",
            &[
                ("username", "ana"),
                ("password", PASSWORD),
                ("password_confirmation", PASSWORD),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Uporabniško ime je že v uporabi"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::new();

    let response = app
        .post(
            "/registracija/",
            &[
                ("username", "ana marija"),
                ("password", PASSWORD),
                ("password_confirmation", PASSWORD),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Vnesite veljavno uporabniško ime"));
}

#[tokio::test]
async fn test_password_change_keeps_only_current_session() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;
    let current = app.login("ana", PASSWORD).await;
    let other = app.login("ana", PASSWORD).await;

    let new_password = "modra-skodelica-7";
    let response = app
        .post(
            "/spremeni-geslo/",
            &[
                ("current_password", PASSWORD),
                ("password", new_password),
                ("password_confirmation", new_password),
            ],
            Some(&current),
        )
        .await;

    response.assert_redirect("/");
    assert_eq!(app.get("/", Some(&current)).await.status, StatusCode::OK);
    app.get("/", Some(&other))
        .await
        .assert_redirect("/prijava/?next=/");

    app.login("ana", new_password).await;
}

#[tokio::test]
async fn test_password_change_wrong_current() {
    let app = TestApp::new();
    app.create_test_user("ana", PASSWORD).await;
    let cookie = app.login("ana", PASSWORD).await;

    let response = app
        .post(
            "/spremeni-geslo/",
            &[
                ("current_password", "napacno-geslo"),
                ("password", "modra-skodelica-7"),
                ("password_confirmation", "modra-skodelica-7"),
            ],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Trenutno geslo ni pravilno."));
    app.login("ana", PASSWORD).await;
}
