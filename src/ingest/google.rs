// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Calendar events API responses.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};
use chrono_tz::Tz;
use serde::Deserialize;

use super::{event_id, google_calendar_id, normalize, IngestError, IngestReport, RawEvent};
use crate::models::CreateCalendarEventInput;
use crate::time_utils::start_of_day;

const CANCELLED: &str = "cancelled";
const UNTITLED: &str = "Untitled";
/// Length given to timed events that arrive without an end.
const DEFAULT_EVENT_HOURS: i64 = 1;

/// One page of `GET /calendars/{id}/events`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleCalendarEvent>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub start: GoogleEventTime,
    #[serde(default)]
    pub end: GoogleEventTime,
    pub status: Option<String>,
}

/// Either a timed instant or an all-day date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    pub date_time: Option<DateTime<FixedOffset>>,
    pub date: Option<NaiveDate>,
    pub time_zone: Option<String>,
}

impl GoogleEventTime {
    /// Wall-clock time in `tz`, and whether this is a date-only value.
    fn resolve(&self, tz: Tz) -> Option<(NaiveDateTime, bool)> {
        if let Some(instant) = self.date_time {
            return Some((instant.with_timezone(&tz).naive_local(), false));
        }
        self.date.map(|date| (start_of_day(date), true))
    }
}

/// Convert one page of Google events for `calendar_id`. Cancelled events are
/// dropped silently; events without a start are skipped and counted.
pub fn parse_google_events(
    response: &GoogleEventsResponse,
    calendar_id: &str,
    tz: Tz,
) -> IngestReport {
    let mut report = IngestReport::default();

    for event in &response.items {
        if event.status.as_deref() == Some(CANCELLED) {
            continue;
        }
        let raw = RawEvent::Google(event.clone());
        report.push(normalize(&raw, calendar_id, tz), calendar_id);
    }

    tracing::debug!(
        calendar_id,
        events = report.events.len(),
        skipped = report.skipped,
        "Parsed Google Calendar events"
    );

    report
}

pub(crate) fn event_input(
    event: &GoogleCalendarEvent,
    calendar_id: &str,
    tz: Tz,
) -> Result<CreateCalendarEventInput, IngestError> {
    let (start, start_is_date) = event
        .start
        .resolve(tz)
        .ok_or(IngestError::MissingField("start"))?;

    let (end, end_is_date) = match event.end.resolve(tz) {
        Some(end) => end,
        None => start
            .checked_add_signed(TimeDelta::hours(DEFAULT_EVENT_HOURS))
            .map(|end| (end, false))
            .ok_or_else(|| IngestError::InvalidDate(start.to_string()))?,
    };

    let title = event
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNTITLED);

    let calendar_id = google_calendar_id(calendar_id);
    Ok(CreateCalendarEventInput {
        id: event_id(&calendar_id, &event.id),
        calendar_id,
        title: title.to_string(),
        start: Some(start),
        end: Some(end),
        is_all_day: start_is_date || end_is_date,
    })
}
