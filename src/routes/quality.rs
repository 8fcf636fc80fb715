// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data-quality and cleanup routes.

use crate::error::{AppError, Result};
use crate::models::{DataQualityIssue, MergeSuggestion};
use crate::routes::query::EventQuery;
use crate::services::{detect_data_quality_issues, generate_merge_suggestions};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quality/issues", post(list_issues))
        .route("/api/quality/merge-suggestions", post(merge_suggestions))
}

// ─── Issues ──────────────────────────────────────────────────

/// An issue together with the key used to hide it.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct IssueResponse {
    pub key: String,
    /// Whether the request's exclusions already hide this issue
    pub hidden: bool,
    #[serde(flatten)]
    pub issue: DataQualityIssue,
}

async fn list_issues(
    State(state): State<Arc<AppState>>,
    Json(query): Json<EventQuery>,
) -> Result<Json<Vec<IssueResponse>>> {
    let selection = query.collection(&state);
    let issues = detect_data_quality_issues(&selection.events, selection.now, &state.quality);
    let hidden_keys = &query.exclusions.hidden_issue_keys;

    tracing::debug!(
        events = selection.events.len(),
        issues = issues.len(),
        "Detected data quality issues"
    );

    Ok(Json(
        issues
            .into_iter()
            .map(|issue| {
                let key = issue.key();
                IssueResponse {
                    hidden: hidden_keys.contains(&key),
                    key,
                    issue,
                }
            })
            .collect(),
    ))
}

// ─── Merge Suggestions ───────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MergeSuggestionsRequest {
    #[serde(flatten)]
    pub query: EventQuery,
    /// Minimum similarity to the group seed; server default when absent
    pub threshold: Option<f64>,
}

async fn merge_suggestions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MergeSuggestionsRequest>,
) -> Result<Json<Vec<MergeSuggestion>>> {
    let threshold = request
        .threshold
        .unwrap_or(state.config.merge_similarity_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AppError::BadRequest(
            "threshold must be between 0 and 1".to_string(),
        ));
    }

    let selection = request.query.collection(&state);
    Ok(Json(generate_merge_suggestions(
        &selection.events,
        threshold,
    )))
}
