// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use calendar_insights::config::Config;
use calendar_insights::ingest::parse_ics;
use calendar_insights::models::{CalendarEvent, CreateCalendarEventInput};
use calendar_insights::routes::create_router;
use calendar_insights::AppState;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::sync::Arc;

/// ICS fixture: four runs in July 2024 (one oddly spelled) and a duplicated
/// yoga class on 2024-08-01. 275 minutes in total.
#[allow(dead_code)]
pub const FITNESS_ICS: &str = include_str!("../fixtures/fitness.ics");

/// Create a test app with an empty calendar store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default()));
    (create_router(state.clone()), state)
}

/// Create a test app with the fitness fixture stored as calendar "fitness".
#[allow(dead_code)]
pub fn create_seeded_app() -> (axum::Router, Arc<AppState>) {
    let (app, state) = create_test_app();
    let report = parse_ics(FITNESS_ICS, "fitness", state.config.display_timezone)
        .expect("Fixture should parse");
    state.store.replace("fitness", report.events);
    (app, state)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

#[allow(dead_code)]
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn event(id: &str, title: &str, start: NaiveDateTime, minutes: i64) -> CalendarEvent {
    CalendarEvent::new(CreateCalendarEventInput {
        id: id.to_string(),
        calendar_id: "test".to_string(),
        title: title.to_string(),
        start: Some(start),
        end: Some(start + TimeDelta::minutes(minutes)),
        is_all_day: false,
    })
    .expect("Valid test event")
}
