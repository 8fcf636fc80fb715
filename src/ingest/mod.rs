// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar ingestion.
//!
//! Every source format is turned into [`CalendarEvent`]s here and nowhere
//! else. Times are converted to the display zone on the way in, so the rest
//! of the crate works on naive wall-clock values.

pub mod google;
pub mod ics;

use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;

use crate::models::{CalendarEvent, EventError};

pub use google::{parse_google_events, GoogleCalendarEvent, GoogleEventTime, GoogleEventsResponse};
pub use ics::parse_ics;

/// One event as delivered by a source, before normalization.
#[derive(Debug, Clone)]
pub enum RawEvent {
    Ics(IcalEvent),
    Google(GoogleCalendarEvent),
}

/// Convert a source event into a [`CalendarEvent`] for `calendar_id`,
/// expressing its times in `tz`.
pub fn normalize(raw: &RawEvent, calendar_id: &str, tz: Tz) -> Result<CalendarEvent, IngestError> {
    let input = match raw {
        RawEvent::Ics(event) => ics::event_input(event, calendar_id, tz)?,
        RawEvent::Google(event) => google::event_input(event, calendar_id, tz)?,
    };
    Ok(CalendarEvent::new(input)?)
}

/// Characters a caller-supplied calendar id may not contain.
///
/// `/` ends the calendar part of an event id and `:` marks a source
/// namespace such as `google:`.
pub const RESERVED_ID_CHARS: [char; 2] = ['/', ':'];

pub fn is_valid_calendar_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(RESERVED_ID_CHARS.as_slice())
}

/// Calendar id carried by events uploaded from Google Calendar.
pub fn google_calendar_id(id: &str) -> String {
    format!("google:{}", id)
}

/// `{calendar_id}/{uid}`; unique across calendars as long as calendar ids
/// never contain `/`.
pub(crate) fn event_id(calendar_id: &str, uid: &str) -> String {
    format!("{}/{}", calendar_id, uid)
}

/// Events from one upload, plus how many source entries were dropped.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub events: Vec<CalendarEvent>,
    pub skipped: usize,
}

impl IngestReport {
    fn push(&mut self, result: Result<CalendarEvent, IngestError>, calendar_id: &str) {
        match result {
            Ok(event) => self.events.push(event),
            Err(e) => {
                tracing::warn!(calendar_id, error = %e, "Skipping malformed event");
                self.skipped += 1;
            }
        }
    }
}

/// Ingestion errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to parse calendar: {0}")]
    Parse(String),

    #[error("Event has no {0}")]
    MissingField(&'static str),

    #[error("Unrecognized date value: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Event(#[from] EventError),
}
