//! Integration tests for the task pages.

use axum::http::StatusCode;

use taskhub_core::types::{TaskId, UserId};

use crate::helpers::TestApp;

const PASSWORD: &str = "zelena-miza-42";

async fn logged_in(app: &TestApp, username: &str) -> (UserId, String) {
    let id = app.create_test_user(username, PASSWORD).await;
    let cookie = app.login(username, PASSWORD).await;
    (id, cookie)
}

async fn only_task(app: &TestApp, owner: UserId) -> TaskId {
    let tasks = app
        .stores
        .tasks
        .list_for_owner(owner)
        .await
        .expect("list tasks");
    assert_eq!(tasks.len(), 1);
    tasks[0].id
}

#[tokio::test]
async fn test_create_and_list() {
    let app = TestApp::new();
    let (_, cookie) = logged_in(&app, "ana").await;

    let form = app.get("/ustvari-opravilo/", Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::OK);

    app.post(
        "/ustvari-opravilo/",
        &[("title", "Kupi mleko"), ("description", "Dva litra")],
        Some(&cookie),
    )
    .await
    .assert_redirect("/");

    let list = app.get("/", Some(&cookie)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("Kupi mleko"));
    assert!(list.body.contains("Nedokončana opravila: <strong>1</strong>"));
}

#[tokio::test]
async fn test_completed_tasks_not_counted() {
    let app = TestApp::new();
    let (_, cookie) = logged_in(&app, "ana").await;

    app.post(
        "/ustvari-opravilo/",
        &[("title", "Odprto")],
        Some(&cookie),
    )
    .await
    .assert_redirect("/");
    app.post(
        "/ustvari-opravilo/",
        &[("title", "Zaprto"), ("completed", "on")],
        Some(&cookie),
    )
    .await
    .assert_redirect("/");

    let list = app.get("/", Some(&cookie)).await;
    assert!(list.body.contains("Nedokončana opravila: <strong>1</strong>"));
}

#[tokio::test]
async fn test_title_too_long_rerenders_form() {
    let app = TestApp::new();
    let (id, cookie) = logged_in(&app, "ana").await;
    let title = "x".repeat(51);

    let response = app
        .post(
            "/ustvari-opravilo/",
            &[("title", title.as_str()), ("description", "ostane")],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("(trenutno jih ima 51)"));
    assert!(response.body.contains("ostane"));
    let tasks = app.stores.tasks.list_for_owner(id).await.expect("list");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_detail_and_update() {
    let app = TestApp::new();
    let (user, cookie) = logged_in(&app, "ana").await;

    app.post(
        "/ustvari-opravilo/",
        &[("title", "Pospravi klet")],
        Some(&cookie),
    )
    .await
    .assert_redirect("/");
    let id = only_task(&app, user).await;

    let detail = app.get(&format!("/opravilo/{id}/"), Some(&cookie)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Pospravi klet"));
    assert!(detail.body.contains("odprto"));

    let edit = app
        .get(&format!("/posodobi-opravilo/{id}/"), Some(&cookie))
        .await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains(r#"value="Pospravi klet""#));

    app.post(
        &format!("/posodobi-opravilo/{id}/"),
        &[("title", "Pospravi podstrešje"), ("completed", "on")],
        Some(&cookie),
    )
    .await
    .assert_redirect("/");

    let detail = app.get(&format!("/opravilo/{id}/"), Some(&cookie)).await;
    assert!(detail.body.contains("Pospravi podstrešje"));
    assert!(detail.body.contains("opravljeno"));

    let list = app.get("/", Some(&cookie)).await;
    assert!(list.body.contains("Nedokončana opravila: <strong>0</strong>"));
}

#[tokio::test]
async fn test_delete_task() {
    let app = TestApp::new();
    let (user, cookie) = logged_in(&app, "ana").await;

    app.post("/ustvari-opravilo/", &[("title", "Zalij rože")], Some(&cookie))
        .await
        .assert_redirect("/");
    let id = only_task(&app, user).await;

    let confirm = app
        .get(&format!("/izbrisi-opravilo/{id}/"), Some(&cookie))
        .await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains("Zalij rože"));

    app.post(&format!("/izbrisi-opravilo/{id}/"), &[], Some(&cookie))
        .await
        .assert_redirect("/");

    let tasks = app.stores.tasks.list_for_owner(user).await.expect("list");
    assert!(tasks.is_empty());
    let detail = app.get(&format!("/opravilo/{id}/"), Some(&cookie)).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_foreign_task_is_not_found() {
    let app = TestApp::new();
    let (owner, owner_cookie) = logged_in(&app, "ana").await;
    let (_, other_cookie) = logged_in(&app, "marko").await;

    app.post(
        "/ustvari-opravilo/",
        &[("title", "Zasebno")],
        Some(&owner_cookie),
    )
    .await
    .assert_redirect("/");
    let id = only_task(&app, owner).await;

    for path in [
        format!("/opravilo/{id}/"),
        format!("/posodobi-opravilo/{id}/"),
        format!("/izbrisi-opravilo/{id}/"),
    ] {
        let response = app.get(&path, Some(&other_cookie)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "GET {path}");
    }

    let update = app
        .post(
            &format!("/posodobi-opravilo/{id}/"),
            &[("title", "Prevzeto")],
            Some(&other_cookie),
        )
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app
        .post(&format!("/izbrisi-opravilo/{id}/"), &[], Some(&other_cookie))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let list = app.get("/", Some(&other_cookie)).await;
    assert!(!list.body.contains("Zasebno"));

    let detail = app
        .get(&format!("/opravilo/{id}/"), Some(&owner_cookie))
        .await;
    assert!(detail.body.contains("Zasebno"));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new();
    let (_, cookie) = logged_in(&app, "ana").await;

    let missing = app.get("/opravilo/999/", Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app.get("/opravilo/abc/", Some(&cookie)).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/ne-obstaja/", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}
