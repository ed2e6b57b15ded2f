mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::Value;

// ---------------------------------------------------------------------------
// POST /api/users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_returns_created_profile() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/users")
        .json(&serde_json::json!({
            "email": "Alice@Example.com",
            "password": "password1234",
            "name": "김민지",
            "phone": "010-1234-5678",
            "birthday": "2008-03-01",
            "school_name": "한국고등학교",
            "school_id": "school-001",
            "terms_agreed": true,
        }))
        .await;

    resp.assert_status(StatusCode::CREATED);
    let body: Value = resp.json();
    assert!(body["id"].as_str().unwrap().starts_with("usr_"));
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["name"], "김민지");
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn signup_collects_field_errors() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/users")
        .json(&serde_json::json!({
            "email": "not-an-email",
            "password": "short",
            "name": "",
            "phone": "010-1234-5678",
            "birthday": "2008-03-01",
            "school_name": "한국고등학교",
            "school_id": "school-001",
        }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"terms_agreed"));
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    common::signup_and_login(&server, "dup@example.com", "첫번째").await;

    let resp = server
        .post("/api/users")
        .json(&serde_json::json!({
            "email": "dup@example.com",
            "password": "password1234",
            "name": "두번째",
            "phone": "010-0000-0000",
            "birthday": "2008-03-01",
            "school_name": "한국고등학교",
            "school_id": "school-001",
            "terms_agreed": true,
        }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "DUPLICATE");
}

// ---------------------------------------------------------------------------
// GET /api/users/@me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_returns_the_current_user() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (user_id, token) = common::signup_and_login(&server, "me@example.com", "나").await;

    let resp = server
        .get("/api/users/@me")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["email"], "me@example.com");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/api/users/@me").await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Missing Authorization header");
}

// ---------------------------------------------------------------------------
// DELETE /api/users/:user_id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_user_requires_superadmin() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_caller_id, caller_token) =
        common::signup_and_login(&server, "caller@example.com", "일반인").await;
    let (target_id, _target_token) =
        common::signup_and_login(&server, "target@example.com", "대상자").await;

    let resp = server
        .delete(&format!("/api/users/{target_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {caller_token}"))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn delete_user_cascades_owned_documents() {
    let (app, state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_id, host_token) = common::signup_and_login(&server, "host@example.com", "부장").await;
    let club_id = common::create_club(&server, &host_token, "과학부").await;
    let date = (Utc::now() + Duration::days(30)).to_rfc3339();
    common::create_event(&server, &host_token, "contest", "해커톤 대회", &date).await;

    let (admin_id, admin_token) =
        common::signup_and_login(&server, "admin@example.com", "관리자").await;
    common::elevate_to_superadmin(&state, &admin_id).await;

    let resp = server
        .delete(&format!("/api/users/{host_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {admin_token}"))
        .await;
    resp.assert_status(StatusCode::NO_CONTENT);

    // Owned club, hosted event and its calendar rows are all gone.
    server
        .get(&format!("/api/club/{club_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let events: Value = server.get("/api/collab").await.json();
    assert!(events.as_array().unwrap().is_empty());

    let schedules: Value = server.get("/api/schedules").await.json();
    assert!(schedules.as_array().unwrap().is_empty());

    // Sessions are revoked with the account.
    server
        .get("/api/users/@me")
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn superadmin_accounts_cannot_be_deleted() {
    let (app, state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (first_id, first_token) =
        common::signup_and_login(&server, "first@example.com", "관리자1").await;
    let (second_id, _second_token) =
        common::signup_and_login(&server, "second@example.com", "관리자2").await;
    common::elevate_to_superadmin(&state, &first_id).await;
    common::elevate_to_superadmin(&state, &second_id).await;

    let resp = server
        .delete(&format!("/api/users/{second_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {first_token}"))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Cannot delete a superadmin account");
}
