// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event selection shared by the analytics endpoints.

use chrono::NaiveDateTime;
use serde::Deserialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::{CalendarEvent, DataBounds, Exclusions, TimeFilter};
use crate::services::{apply_exclusions, filter_by_calendars, resolve_range, select_events};
use crate::time_utils::now_in;
use crate::AppState;

/// Which events a request is about.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EventQuery {
    #[serde(default)]
    pub filter: TimeFilter,
    /// Restrict to these calendars; all calendars when absent
    #[serde(default)]
    pub calendar_ids: Option<Vec<String>>,
    #[serde(default)]
    pub exclusions: Exclusions,
}

/// Events selected by a query, with the instant used as "now".
pub struct Selection {
    pub events: Vec<CalendarEvent>,
    pub now: NaiveDateTime,
}

impl EventQuery {
    /// Calendars, then exclusions, then the time window.
    ///
    /// Lifetime bounds come from the events left after exclusions.
    pub fn select(&self, state: &AppState) -> Result<Selection> {
        let now = now_in(state.config.display_timezone);
        let events = self.calendar_events(state);

        let visible = apply_exclusions(&events, &self.exclusions, now, &state.quality);
        let bounds = DataBounds::from_events(&visible);

        // Reject impossible filters instead of silently selecting nothing
        resolve_range(&self.filter, now, &bounds)?;

        Ok(Selection {
            events: select_events(&visible, &self.filter, now, &bounds),
            now,
        })
    }

    /// Whole collection for cleanup views: removals and merges applied, but
    /// no time window and nothing merely hidden.
    pub fn collection(&self, state: &AppState) -> Selection {
        let now = now_in(state.config.display_timezone);
        let edits = Exclusions {
            removed_event_ids: self.exclusions.removed_event_ids.clone(),
            title_merges: self.exclusions.title_merges.clone(),
            ..Default::default()
        };

        Selection {
            events: apply_exclusions(&self.calendar_events(state), &edits, now, &state.quality),
            now,
        }
    }

    fn calendar_events(&self, state: &AppState) -> Vec<CalendarEvent> {
        let events = state.store.all_events();
        match &self.calendar_ids {
            Some(calendar_ids) => filter_by_calendars(&events, calendar_ids),
            None => events,
        }
    }
}
