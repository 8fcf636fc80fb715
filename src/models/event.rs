// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canonical calendar event model.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::minutes_between;

/// Input for building a [`CalendarEvent`], as produced by the ingestion layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCalendarEventInput {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_all_day: bool,
}

/// A single calendar entry with its derived fields.
///
/// Derived fields are computed once from `start`/`end` in [`CalendarEvent::new`].
/// There are no setters; use [`CalendarEvent::with_title`] to rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CreateCalendarEventInput")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarEvent {
    id: String,
    /// Source calendar (uploaded file or linked feed)
    calendar_id: String,
    /// Activity name as written in the source
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration_minutes: i64,
    /// 0 = Sunday .. 6 = Saturday
    day_of_week: u32,
    /// "YYYY-MM-DD" of `start`
    day_string: String,
    is_all_day: bool,
}

impl CalendarEvent {
    /// Build an event, deriving duration, weekday and day string.
    pub fn new(input: CreateCalendarEventInput) -> Result<Self, EventError> {
        let start = input.start.ok_or(EventError::MissingStart)?;
        let end = input.end.ok_or(EventError::MissingEnd)?;
        if end < start {
            return Err(EventError::EndBeforeStart { start, end });
        }

        Ok(Self {
            id: input.id,
            calendar_id: input.calendar_id,
            title: input.title,
            start,
            end,
            duration_minutes: minutes_between(start, end),
            day_of_week: start.weekday().num_days_from_sunday(),
            day_string: start.format("%Y-%m-%d").to_string(),
            is_all_day: input.is_all_day,
        })
    }

    /// Rebuild this event under a different title.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn day_of_week(&self) -> u32 {
        self.day_of_week
    }

    pub fn day_string(&self) -> &str {
        &self.day_string
    }

    pub fn is_all_day(&self) -> bool {
        self.is_all_day
    }
}

impl TryFrom<CreateCalendarEventInput> for CalendarEvent {
    type Error = EventError;

    fn try_from(input: CreateCalendarEventInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

/// Errors from event construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("Missing temporal bounds: event has no start")]
    MissingStart,

    #[error("Missing temporal bounds: event has no end")]
    MissingEnd,

    #[error("Event ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}
