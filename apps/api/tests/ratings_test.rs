mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::Value;

/// Contest hosted by one user with a second user's club approved as a
/// participant. Returns (host_token, chief_token, event_id, club_id).
async fn contest_with_approved_club(
    server: &TestServer,
    event_date: &str,
) -> (String, String, String, String) {
    let (_host_id, host_token) = common::signup_and_login(server, "host@example.com", "주최자").await;
    let (_chief_id, chief_token) = common::signup_and_login(server, "chief@example.com", "부장").await;
    let club_id = common::create_club(server, &chief_token, "로봇공학부").await;
    let event_id = common::create_event(server, &host_token, "contest", "가을 대회", event_date).await;

    approve_club_participation(server, &host_token, &chief_token, &event_id, &club_id).await;

    (host_token, chief_token, event_id, club_id)
}

async fn approve_club_participation(
    server: &TestServer,
    host_token: &str,
    chief_token: &str,
    event_id: &str,
    club_id: &str,
) {
    let resp = server
        .post("/api/participate")
        .add_header(AUTHORIZATION, format!("Bearer {chief_token}"))
        .json(&serde_json::json!({
            "event_type": "contest",
            "event_id": event_id,
            "club_id": club_id,
        }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let participant_id = resp.json::<Value>()["id"].as_str().unwrap().to_string();

    server
        .patch(&format!("/api/participate/{participant_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({ "status": "approved" }))
        .await
        .assert_status_ok();
}

fn past_date() -> String {
    (Utc::now() - Duration::days(1)).to_rfc3339()
}

// ---------------------------------------------------------------------------
// GET /api/events/:event_type/:id/ratings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn host_lists_rating_targets() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, _chief_token, event_id, club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    let resp = server
        .get(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .await;

    resp.assert_status_ok();
    let targets: Value = resp.json();
    let targets = targets.as_array().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0]["club_id"], club_id.as_str());
    assert_eq!(targets[0]["club_name"], "로봇공학부");
    assert_eq!(targets[0]["trust_score"], 70);
    assert_eq!(targets[0]["already_rated"], false);
}

#[tokio::test]
async fn targets_skip_unaffiliated_participants() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, _chief_token, event_id, _club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    // A free-text team has no club document and cannot be rated.
    let (_solo_id, solo_token) = common::signup_and_login(&server, "solo@example.com", "솔로").await;
    let resp = server
        .post("/api/participate")
        .add_header(AUTHORIZATION, format!("Bearer {solo_token}"))
        .json(&serde_json::json!({
            "event_type": "contest",
            "event_id": event_id,
            "club_name": "자유팀",
        }))
        .await;
    let participant_id = resp.json::<Value>()["id"].as_str().unwrap().to_string();
    server
        .patch(&format!("/api/participate/{participant_id}"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({ "status": "approved" }))
        .await
        .assert_status_ok();

    let targets: Value = server
        .get(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .await
        .json();
    assert_eq!(targets.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// POST /api/events/:event_type/:id/ratings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rating_waits_for_the_event_to_end() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let future = (Utc::now() + Duration::days(5)).to_rfc3339();
    let (host_token, _chief_token, event_id, club_id) =
        contest_with_approved_club(&server, &future).await;

    let resp = server
        .post(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({
            "target_club_id": club_id,
            "professionalism": 5,
            "reliability": 4,
            "collaboration_intent": 3,
        }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "PRECONDITION_FAILED");
    assert_eq!(body["error"]["message"], "Event has not ended yet");
}

#[tokio::test]
async fn only_the_host_rates() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (_host_token, chief_token, event_id, club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    let resp = server
        .post(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {chief_token}"))
        .json(&serde_json::json!({
            "target_club_id": club_id,
            "professionalism": 5,
            "reliability": 5,
            "collaboration_intent": 5,
        }))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rating_requires_approved_participation() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, _chief_token, event_id, _club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    // A club that never participated in this event.
    let (_other_id, other_token) = common::signup_and_login(&server, "other@example.com", "남").await;
    let outsider_club = common::create_club(&server, &other_token, "외부 동아리").await;

    let resp = server
        .post(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({
            "target_club_id": outsider_club,
            "professionalism": 4,
            "reliability": 4,
            "collaboration_intent": 4,
        }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "PRECONDITION_FAILED");
    assert_eq!(
        body["error"]["message"],
        "Club has no approved participation for this event"
    );
}

#[tokio::test]
async fn rating_scores_must_be_in_range() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, _chief_token, event_id, club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    let resp = server
        .post(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({
            "target_club_id": club_id,
            "professionalism": 0,
            "reliability": 3,
            "collaboration_intent": 6,
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
    assert_eq!(fields, vec!["professionalism", "collaboration_intent"]);
}

#[tokio::test]
async fn rating_updates_club_trust() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, _chief_token, event_id, club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    let resp = server
        .post(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .json(&serde_json::json!({
            "target_club_id": club_id,
            "professionalism": 5,
            "reliability": 4,
            "collaboration_intent": 3,
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["rating"]["score"], 4.0);
    // mean 4.0 of 5 → 80 on the 0–100 scale.
    assert_eq!(body["club"]["trust_score"], 80);
    assert_eq!(body["club"]["trust_count"], 1);

    let club: Value = server.get(&format!("/api/club/{club_id}")).await.json();
    assert_eq!(club["trust_score"], 80);

    let targets: Value = server
        .get(&format!("/api/events/contest/{event_id}/ratings"))
        .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
        .await
        .json();
    assert_eq!(targets.as_array().unwrap()[0]["already_rated"], true);
}

#[tokio::test]
async fn re_rating_replaces_the_previous_score() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, _chief_token, event_id, club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    for scores in [[5, 4, 3], [1, 1, 1]] {
        server
            .post(&format!("/api/events/contest/{event_id}/ratings"))
            .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
            .json(&serde_json::json!({
                "target_club_id": club_id,
                "professionalism": scores[0],
                "reliability": scores[1],
                "collaboration_intent": scores[2],
            }))
            .await
            .assert_status_ok();
    }

    let club: Value = server.get(&format!("/api/club/{club_id}")).await.json();
    assert_eq!(club["trust_score"], 20);
    assert_eq!(club["trust_count"], 1);
}

#[tokio::test]
async fn trust_averages_across_events() {
    let (app, _state) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let (host_token, chief_token, first_event, club_id) =
        contest_with_approved_club(&server, &past_date()).await;

    let second_event =
        common::create_event(&server, &host_token, "contest", "겨울 대회", &past_date()).await;
    approve_club_participation(&server, &host_token, &chief_token, &second_event, &club_id).await;

    for (event_id, scores) in [(&first_event, [5, 5, 5]), (&second_event, [1, 1, 1])] {
        server
            .post(&format!("/api/events/contest/{event_id}/ratings"))
            .add_header(AUTHORIZATION, format!("Bearer {host_token}"))
            .json(&serde_json::json!({
                "target_club_id": club_id,
                "professionalism": scores[0],
                "reliability": scores[1],
                "collaboration_intent": scores[2],
            }))
            .await
            .assert_status_ok();
    }

    // (5.0 + 1.0) / 2 = 3.0 of 5 → 60.
    let club: Value = server.get(&format!("/api/club/{club_id}")).await.json();
    assert_eq!(club["trust_score"], 60);
    assert_eq!(club["trust_count"], 2);
}
