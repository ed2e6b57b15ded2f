use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use moyeora_api::config::Config;
use moyeora_api::db::memory::MemoryStore;
use moyeora_api::db::store::Store;
use moyeora_api::models::user::Role;
use moyeora_api::AppState;

pub const CRON_SECRET: &str = "test-cron-secret";
pub const PASSWORD: &str = "password1234";

/// Build the full application wired to a fresh in-memory store.
pub fn test_app() -> (Router, AppState) {
    let config = Config {
        port: 0,
        cron_secret: CRON_SECRET.to_string(),
        session_ttl_days: 30,
        superadmin_email: None,
        superadmin_password: None,
    };
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: Arc::new(config),
    };
    let app = moyeora_api::routes::router().with_state(state.clone());
    (app, state)
}

/// Sign up a fresh user at the given school and log them in.
/// Returns (user_id, bearer token).
pub async fn signup_with_school(
    server: &TestServer,
    email: &str,
    name: &str,
    school_id: &str,
) -> (String, String) {
    let resp = server
        .post("/api/users")
        .json(&serde_json::json!({
            "email": email,
            "password": PASSWORD,
            "name": name,
            "phone": "010-0000-0000",
            "birthday": "2008-03-01",
            "school_name": "한국고등학교",
            "school_id": school_id,
            "terms_agreed": true,
        }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let user_id = resp.json::<Value>()["id"].as_str().unwrap().to_string();

    let resp = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "email": email, "password": PASSWORD }))
        .await;
    resp.assert_status_ok();
    let token = resp.json::<Value>()["token"].as_str().unwrap().to_string();

    (user_id, token)
}

/// Sign up a fresh user and log them in. Returns (user_id, bearer token).
pub async fn signup_and_login(server: &TestServer, email: &str, name: &str) -> (String, String) {
    signup_with_school(server, email, name, "school-001").await
}

/// Role elevation happens out-of-band (startup bootstrap), so tests go
/// straight to the store.
pub async fn elevate_to_superadmin(state: &AppState, user_id: &str) {
    state
        .store
        .set_user_role(user_id, Role::Superadmin)
        .await
        .unwrap()
        .expect("user to elevate exists");
}

/// Create a club and return its id.
pub async fn create_club(server: &TestServer, token: &str, name: &str) -> String {
    let resp = server
        .post("/api/club")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&serde_json::json!({
            "name": name,
            "theme": "과학",
            "description": "테스트 동아리",
            "contact": "contact@example.com",
        }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json::<Value>()["id"].as_str().unwrap().to_string()
}

/// Create an event in the given category and return its id.
pub async fn create_event(
    server: &TestServer,
    token: &str,
    category: &str,
    name: &str,
    date: &str,
) -> String {
    let resp = server
        .post("/api/collab")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&serde_json::json!({
            "category": category,
            "name": name,
            "event_type": "해커톤",
            "date": date,
            "place": "서울",
            "description": "테스트 행사",
            "contact": "host@example.com",
        }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json::<Value>()["id"].as_str().unwrap().to_string()
}
