// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar upload and management API tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn ics_upload(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/calendar")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_upload_ics_then_list() {
    let (app, state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(ics_upload("/api/calendars/fitness/ics", common::FITNESS_ICS))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["calendar_id"], "fitness");
    assert_eq!(body["imported"], 6);
    assert_eq!(body["skipped"], 0);
    assert!(body["replaced"].is_null());
    assert_eq!(state.store.all_events().len(), 6);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/calendars")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = common::read_json(response).await;
    assert_eq!(body, json!([{"id": "fitness", "event_count": 6}]));
}

#[tokio::test]
async fn test_reupload_replaces_calendar() {
    let (app, state) = common::create_seeded_app();

    let single = "BEGIN:VCALENDAR
BEGIN:VEVENT
UID:swim
SUMMARY:Swim
DTSTART:20240901T060000Z
DTEND:20240901T063000Z
END:VEVENT
END:VCALENDAR
";
    let response = app
        .oneshot(ics_upload("/api/calendars/fitness/ics", single))
        .await
        .unwrap();
    let body = common::read_json(response).await;

    assert_eq!(body["replaced"], 6);
    let events = state.store.all_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title(), "Swim");
}

#[tokio::test]
async fn test_invalid_ics_rejected() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(ics_upload("/api/calendars/broken/ics", "this is not a calendar"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "invalid_calendar");
    assert!(state.store.summaries().is_empty());
}

#[tokio::test]
async fn test_upload_too_large() {
    let (app, state) = common::create_test_app();
    let oversized = "X".repeat(state.config.max_upload_bytes + 1);

    let response = app
        .oneshot(ics_upload("/api/calendars/big/ics", oversized))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_upload_google_events() {
    let (app, state) = common::create_test_app();

    let page = json!({
        "items": [
            {
                "id": "e1",
                "summary": "Planning",
                "start": {"dateTime": "2024-05-06T10:00:00Z"},
                "end": {"dateTime": "2024-05-06T11:30:00Z"}
            },
            {
                "id": "e2",
                "status": "cancelled",
                "start": {"dateTime": "2024-05-07T10:00:00Z"},
                "end": {"dateTime": "2024-05-07T11:00:00Z"}
            }
        ]
    });

    let response = app
        .oneshot(common::json_request("PUT", "/api/calendars/work/google", page))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["calendar_id"], "google:work");
    assert_eq!(body["imported"], 1);

    let events = state.store.all_events();
    assert_eq!(events[0].id(), "google:work/e1");
    assert_eq!(events[0].duration_minutes(), 90);
}

#[tokio::test]
async fn test_google_and_ics_uploads_do_not_share_ids() {
    let (app, state) = common::create_test_app();

    let page = json!({
        "items": [{
            "id": "e1",
            "summary": "Planning",
            "start": {"dateTime": "2024-05-06T10:00:00Z"},
            "end": {"dateTime": "2024-05-06T11:00:00Z"}
        }]
    });
    let response = app
        .clone()
        .oneshot(common::json_request("PUT", "/api/calendars/work/google", page))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(ics_upload("/api/calendars/work/ics", common::FITNESS_ICS))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::read_json(response).await["replaced"].is_null());

    let ids: Vec<String> = state
        .store
        .summaries()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec!["google:work", "work"]);
}

#[tokio::test]
async fn test_reserved_calendar_ids_rejected() {
    let (app, state) = common::create_test_app();

    for uri in ["/api/calendars/google:work/ics", "/api/calendars/a%2Fb/ics"] {
        let response = app
            .clone()
            .oneshot(ics_upload(uri, common::FITNESS_ICS))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert!(state.store.summaries().is_empty());
}

#[tokio::test]
async fn test_delete_calendar() {
    let (app, state) = common::create_seeded_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/calendars/fitness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["removed"], 6);
    assert!(state.store.all_events().is_empty());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/calendars/fitness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
