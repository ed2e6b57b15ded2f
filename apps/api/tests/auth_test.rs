mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::Value;

use moyeora_api::db::store::Store;
use moyeora_api::models::session::Session;

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_a_session_token() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    common::signup_and_login(&server, "login@example.com", "로그인").await;

    let resp = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "login@example.com",
            "password": common::PASSWORD,
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body["token"].as_str().unwrap().starts_with("ses_"));
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["expires_at"].is_string());
    assert_eq!(body["user"]["email"], "login@example.com");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    common::signup_and_login(&server, "wrong@example.com", "틀림").await;

    let resp = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "wrong@example.com",
            "password": "not-the-password",
        }))
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "nobody@example.com",
            "password": common::PASSWORD,
        }))
        .await;

    // Indistinguishable from a wrong password.
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_revokes_the_session() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_user_id, token) = common::signup_and_login(&server, "bye@example.com", "안녕").await;

    server
        .post("/api/auth/logout")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let resp = server
        .get("/api/users/@me")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Invalid or expired session");
}

// ---------------------------------------------------------------------------
// Bearer token handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/api/users/@me")
        .add_header(AUTHORIZATION, "Token abc123")
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Invalid Authorization header format");
}

#[tokio::test]
async fn expired_sessions_are_rejected() {
    let (app, state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (user_id, _token) = common::signup_and_login(&server, "stale@example.com", "만료").await;

    let now = Utc::now();
    state
        .store
        .insert_session(Session {
            token: "ses_expired".to_string(),
            user_id,
            created_at: now - Duration::days(31),
            expires_at: now - Duration::days(1),
        })
        .await
        .unwrap();

    let resp = server
        .get("/api/users/@me")
        .add_header(AUTHORIZATION, "Bearer ses_expired")
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Invalid or expired session");
}
