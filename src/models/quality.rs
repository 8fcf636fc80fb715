// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data-quality issues and merge suggestions.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::CalendarEvent;

/// Kind of anomaly detected on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum IssueType {
    LongDuration,
    ZeroDuration,
    Duplicate,
    FutureEvent,
    Birthday,
    RecurringHoliday,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::LongDuration => "long_duration",
            IssueType::ZeroDuration => "zero_duration",
            IssueType::Duplicate => "duplicate",
            IssueType::FutureEvent => "future_event",
            IssueType::Birthday => "birthday",
            IssueType::RecurringHoliday => "recurring_holiday",
        }
    }

    /// Severity is fixed per issue type.
    pub fn severity(&self) -> Severity {
        match self {
            IssueType::ZeroDuration => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Warning,
    Error,
}

/// One (event, reason) anomaly. An event may carry several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DataQualityIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub event: CalendarEvent,
    pub message: String,
    pub severity: Severity,
}

impl DataQualityIssue {
    pub fn new(issue_type: IssueType, event: &CalendarEvent, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            event: event.clone(),
            message: message.into(),
            severity: issue_type.severity(),
        }
    }

    /// Key the client stores to hide this issue: `{event_id}-{type}`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.event.id(), self.issue_type.as_str())
    }
}

/// Proposed grouping of similarly named activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MergeSuggestion {
    /// Original titles in the group (seed first)
    pub activities: Vec<String>,
    pub suggested_name: String,
    /// Mean pairwise similarity within the group (0..1)
    pub confidence: f64,
    pub event_count: usize,
    pub total_minutes: i64,
}
