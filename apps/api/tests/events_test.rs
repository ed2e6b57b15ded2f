mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::Value;

// ---------------------------------------------------------------------------
// POST /api/collab
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_event_projects_two_calendar_rows() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_id, host_token) = common::signup_and_login(&server, "host@example.com", "주최자").await;
    let (_other_id, other_token) =
        common::signup_and_login(&server, "other@example.com", "구경꾼").await;

    let date = (Utc::now() + Duration::days(14)).to_rfc3339();
    let resp = server
        .post("/api/collab")
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({
            "category": "contest",
            "name": "전국 해커톤",
            "event_type": "해커톤",
            "date": date,
            "place": "서울",
            "description": "밤샘 코딩 대회",
            "contact": "host@example.com",
        }))
        .await;

    resp.assert_status(StatusCode::CREATED);
    let event: Value = resp.json();
    assert!(event["id"].as_str().unwrap().starts_with("evt_"));
    assert_eq!(event["category"], "contest");
    assert_eq!(event["user_id"], host_id.as_str());
    assert_eq!(event["notices"], serde_json::json!([]));

    // One public row for everyone.
    let public: Value = server.get("/api/schedules").await.json();
    let public = public.as_array().unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["name"], "전국 해커톤");
    assert_eq!(public[0]["is_public"], true);

    // One private mirror for the host only.
    let mine: Value = server
        .get("/api/schedules/@me")
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .await
        .json();
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["is_public"], false);

    let theirs: Value = server
        .get("/api/schedules/@me")
        .add_header(AUTHORIZATION, format!("Bearer {other_token}"))
        .await
        .json();
    assert!(theirs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_event_collects_field_errors() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_host_id, host_token) = common::signup_and_login(&server, "bad@example.com", "주최자").await;

    let resp = server
        .post("/api/collab")
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({
            "category": "marathon",
            "name": "",
            "event_type": "해커톤",
            "date": "next friday",
            "place": "서울",
            "description": "설명",
            "contact": "연락처",
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
    assert!(fields.contains(&"category"));
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"date"));
}

// ---------------------------------------------------------------------------
// GET /api/collab
// ---------------------------------------------------------------------------

#[tokio::test]
async fn events_are_listed_latest_date_first() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_host_id, host_token) = common::signup_and_login(&server, "list@example.com", "주최자").await;

    let now = Utc::now();
    common::create_event(
        &server,
        &host_token,
        "contest",
        "중간 행사",
        &(now + Duration::days(3)).to_rfc3339(),
    )
    .await;
    common::create_event(
        &server,
        &host_token,
        "forum",
        "첫 행사",
        &(now + Duration::days(1)).to_rfc3339(),
    )
    .await;
    common::create_event(
        &server,
        &host_token,
        "research",
        "마지막 행사",
        &(now + Duration::days(5)).to_rfc3339(),
    )
    .await;

    let events: Value = server.get("/api/collab").await.json();
    let names: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["마지막 행사", "중간 행사", "첫 행사"]);
}

// ---------------------------------------------------------------------------
// GET /api/collab/:event_type/:id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_event_is_scoped_to_its_category() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_host_id, host_token) = common::signup_and_login(&server, "scope@example.com", "주최자").await;
    let date = (Utc::now() + Duration::days(7)).to_rfc3339();
    let event_id = common::create_event(&server, &host_token, "contest", "대회", &date).await;

    let resp = server.get(&format!("/api/collab/contest/{event_id}")).await;
    resp.assert_status_ok();
    let event: Value = resp.json();
    assert_eq!(event["name"], "대회");

    // The same id under another category does not resolve.
    server
        .get(&format!("/api/collab/forum/{event_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let resp = server.get(&format!("/api/collab/marathon/{event_id}")).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Unknown event type");
}

// ---------------------------------------------------------------------------
// DELETE /api/collab/:event_type/:id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_event_requires_superadmin() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_host_id, host_token) = common::signup_and_login(&server, "own@example.com", "주최자").await;
    let date = (Utc::now() + Duration::days(7)).to_rfc3339();
    let event_id = common::create_event(&server, &host_token, "contest", "내 행사", &date).await;

    // Even the host cannot delete their own event.
    server
        .delete(&format!("/api/collab/contest/{event_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn superadmin_delete_cascades_schedules_and_participants() {
    let (app, state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_host_id, host_token) = common::signup_and_login(&server, "gone@example.com", "주최자").await;
    let (_applicant_id, applicant_token) =
        common::signup_and_login(&server, "joined@example.com", "참가자").await;
    let (admin_id, admin_token) =
        common::signup_and_login(&server, "admin@example.com", "관리자").await;
    common::elevate_to_superadmin(&state, &admin_id).await;

    let date = (Utc::now() + Duration::days(7)).to_rfc3339();
    let event_id = common::create_event(&server, &host_token, "contest", "사라질 행사", &date).await;

    server
        .post("/api/participate")
        .add_header(AUTHORIZATION, format!("Bearer {applicant_token}"))
        .json(&serde_json::json!({
            "event_type": "contest",
            "event_id": event_id,
            "club_name": "자유팀",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete(&format!("/api/collab/contest/{event_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {admin_token}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/collab/contest/{event_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let schedules: Value = server.get("/api/schedules").await.json();
    assert!(schedules.as_array().unwrap().is_empty());

    let participations: Value = server
        .get("/api/participate/@me")
        .add_header(AUTHORIZATION, format!("Bearer {applicant_token}"))
        .await
        .json();
    assert!(participations.as_array().unwrap().is_empty());
}
