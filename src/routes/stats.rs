// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics routes. Every endpoint takes an [`EventQuery`] in its body.

use crate::error::{AppError, Result};
use crate::models::{ActivityOption, ActivityStats, GlobalStats, SortBy, TopActivity};
use crate::routes::query::EventQuery;
use crate::services::distribution::{
    by_hour_of_day, contribution_calendar, minutes_by_day_of_week, minutes_by_month, time_logged,
    ContributionDay, HourBucket, Interval, TimeBucket,
};
use crate::services::stats::DEFAULT_TOP_LIMIT;
use crate::services::{
    compute_activity_stats, compute_global_stats, compute_top_activities, search_activities,
    unique_activities,
};
use crate::time_utils::{
    breakdown_minutes, format_days_hours_minutes, format_hours_minutes, format_minutes,
    TimeBreakdown,
};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const MAX_TOP_LIMIT: usize = 100;
const DEFAULT_CONTRIBUTION_DAYS: u64 = 365;
const MAX_CONTRIBUTION_DAYS: u64 = 3660;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats/global", post(global_stats))
        .route("/api/stats/activity", post(activity_stats))
        .route("/api/stats/top", post(top_activities))
        .route("/api/stats/distribution", post(distribution))
        .route("/api/activities", post(list_activities))
}

// ─── Global Stats ────────────────────────────────────────────

/// Total time rendered the three ways the dashboard shows it.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormattedDuration {
    pub days_hours_minutes: String,
    pub hours_minutes: String,
    pub minutes: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GlobalStatsResponse {
    #[serde(flatten)]
    pub stats: GlobalStats,
    pub breakdown: TimeBreakdown,
    pub formatted: FormattedDuration,
}

async fn global_stats(
    State(state): State<Arc<AppState>>,
    Json(query): Json<EventQuery>,
) -> Result<Json<GlobalStatsResponse>> {
    let selection = query.select(&state)?;
    let stats = compute_global_stats(&selection.events);
    let total = stats.total_minutes;

    Ok(Json(GlobalStatsResponse {
        stats,
        breakdown: breakdown_minutes(total),
        formatted: FormattedDuration {
            days_hours_minutes: format_days_hours_minutes(total),
            hours_minutes: format_hours_minutes(total),
            minutes: format_minutes(total),
        },
    }))
}

// ─── Activity Stats ──────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityStatsRequest {
    #[serde(flatten)]
    pub query: EventQuery,
    /// Case-insensitive substring of the activity title
    pub search: String,
}

async fn activity_stats(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActivityStatsRequest>,
) -> Result<Json<ActivityStats>> {
    let selection = request.query.select(&state)?;
    Ok(Json(compute_activity_stats(
        &selection.events,
        &request.search,
    )))
}

// ─── Top Activities ──────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TopActivitiesRequest {
    #[serde(flatten)]
    pub query: EventQuery,
    #[serde(default)]
    pub sort_by: SortBy,
    pub limit: Option<usize>,
}

async fn top_activities(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TopActivitiesRequest>,
) -> Result<Json<Vec<TopActivity>>> {
    let limit = request.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    if limit > MAX_TOP_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be at most {}",
            MAX_TOP_LIMIT
        )));
    }

    let selection = request.query.select(&state)?;
    Ok(Json(compute_top_activities(
        &selection.events,
        request.sort_by,
        limit,
    )))
}

// ─── Distributions ───────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DistributionRequest {
    #[serde(flatten)]
    pub query: EventQuery,
    /// Bucket width of the time-logged series
    #[serde(default)]
    pub interval: Interval,
    /// Length of the contributions window
    pub days: Option<u64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DistributionResponse {
    /// Minutes per weekday, Sunday first
    pub by_day_of_week: [i64; 7],
    pub by_hour: Vec<HourBucket>,
    /// Minutes per month, January first
    pub by_month: [i64; 12],
    pub contributions: Vec<ContributionDay>,
    pub time_logged: Vec<TimeBucket>,
}

async fn distribution(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DistributionRequest>,
) -> Result<Json<DistributionResponse>> {
    let days = request.days.unwrap_or(DEFAULT_CONTRIBUTION_DAYS);
    if days == 0 || days > MAX_CONTRIBUTION_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_CONTRIBUTION_DAYS
        )));
    }

    let selection = request.query.select(&state)?;
    let events = &selection.events;

    Ok(Json(DistributionResponse {
        by_day_of_week: minutes_by_day_of_week(events),
        by_hour: by_hour_of_day(events),
        by_month: minutes_by_month(events),
        contributions: contribution_calendar(events, selection.now.date(), days),
        time_logged: time_logged(events, request.interval, selection.now),
    }))
}

// ─── Activity Catalog ────────────────────────────────────────

#[derive(Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesRequest {
    #[serde(flatten)]
    pub query: EventQuery,
    /// Narrow to matching titles (at most ten results)
    pub search: Option<String>,
}

/// Distinct activity titles, most frequent first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActivitiesRequest>,
) -> Result<Json<Vec<ActivityOption>>> {
    let selection = request.query.select(&state)?;
    let options = unique_activities(&selection.events);

    let result = match request.search.as_deref() {
        Some(term) => search_activities(&options, term),
        None => options,
    };
    Ok(Json(result))
}
