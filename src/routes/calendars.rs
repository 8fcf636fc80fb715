// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar upload and management routes.

use crate::error::{AppError, Result};
use crate::ingest::{
    google_calendar_id, is_valid_calendar_id, parse_google_events, parse_ics,
    GoogleEventsResponse, IngestReport,
};
use crate::store::CalendarSummary;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calendars", get(list_calendars))
        .route("/api/calendars/{id}/ics", put(upload_ics))
        .route("/api/calendars/{id}/google", put(upload_google))
        .route("/api/calendars/{id}", delete(delete_calendar))
}

// ─── Listing ─────────────────────────────────────────────────

async fn list_calendars(State(state): State<Arc<AppState>>) -> Json<Vec<CalendarSummary>> {
    Json(state.store.summaries())
}

// ─── Uploads ─────────────────────────────────────────────────

/// Result of replacing a calendar's contents.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImportResponse {
    pub calendar_id: String,
    pub imported: usize,
    pub skipped: usize,
    /// Event count of the calendar this upload replaced, if any
    pub replaced: Option<usize>,
}

fn store_report(state: &AppState, calendar_id: String, report: IngestReport) -> ImportResponse {
    let imported = report.events.len();
    let replaced = state.store.replace(&calendar_id, report.events);

    tracing::info!(
        calendar_id = %calendar_id,
        events = imported,
        skipped = report.skipped,
        "Calendar ingested"
    );

    ImportResponse {
        calendar_id,
        imported,
        skipped: report.skipped,
        replaced,
    }
}

/// Replace a calendar from an ICS document in the request body.
async fn upload_ics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<ImportResponse>> {
    let id = validate_calendar_id(&id)?.to_string();
    let tz = state.config.display_timezone;

    // CPU-bound for large documents
    let calendar_id = id.clone();
    let report = tokio::task::spawn_blocking(move || parse_ics(&body, &calendar_id, tz))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("ICS parse task failed: {}", e)))??;

    Ok(Json(store_report(&state, id, report)))
}

/// Replace a calendar from a Google Calendar events response.
///
/// Events are stored under `google:{id}`, the calendar id they carry, so
/// they never replace an ICS upload with the same `{id}`.
async fn upload_google(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(response): Json<GoogleEventsResponse>,
) -> Result<Json<ImportResponse>> {
    let id = validate_calendar_id(&id)?;
    let report = parse_google_events(&response, id, state.config.display_timezone);
    Ok(Json(store_report(&state, google_calendar_id(id), report)))
}

fn validate_calendar_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if !is_valid_calendar_id(id) {
        return Err(AppError::BadRequest(
            "Calendar id must be non-empty and must not contain '/' or ':'".to_string(),
        ));
    }
    Ok(id)
}

// ─── Deletion ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteCalendarResponse {
    pub calendar_id: String,
    pub removed: usize,
}

async fn delete_calendar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteCalendarResponse>> {
    let events = state
        .store
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Calendar {} not found", id)))?;

    tracing::info!(calendar_id = %id, events = events.len(), "Calendar deleted");

    Ok(Json(DeleteCalendarResponse {
        calendar_id: id,
        removed: events.len(),
    }))
}
