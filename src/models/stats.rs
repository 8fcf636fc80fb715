//! Aggregate statistics returned to the dashboard.
//!
//! All of these are recomputed from the event collection on every request;
//! nothing here is persisted.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Totals across a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GlobalStats {
    pub total_count: usize,
    /// Number of distinct titles
    pub unique_activities: usize,
    pub total_minutes: i64,
}

/// Statistics for every event whose title contains a search string.
///
/// When nothing matches, counters are zero and every optional field is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityStats {
    /// Search string the stats were computed for
    pub name: String,

    // ─── Overview ────────────────────────────────────────────────
    pub total_count: usize,
    pub total_minutes: i64,
    pub first_session: Option<NaiveDateTime>,
    pub last_session: Option<NaiveDateTime>,

    // ─── Durations ───────────────────────────────────────────────
    pub average_session_minutes: i64,
    pub longest_session: Option<LongestSession>,

    // ─── Consistency ─────────────────────────────────────────────
    pub longest_streak: Option<Streak>,
    pub biggest_break: Option<Break>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LongestSession {
    pub minutes: i64,
    pub date: NaiveDateTime,
}

/// Run of consecutive calendar days with at least one matching event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Streak {
    pub days: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Largest gap between the starts of two adjacent matching events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Break {
    pub days: i64,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// One row of the top-activities ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TopActivity {
    pub name: String,
    pub count: usize,
    pub total_minutes: i64,
    pub longest_session_minutes: i64,
    pub average_session_minutes: i64,
}

/// Ranking key for top activities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SortBy {
    #[default]
    Count,
    Time,
}

/// Distinct activity name with its event count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityOption {
    pub name: String,
    pub count: usize,
}
