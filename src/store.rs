// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory calendar storage shared by all request handlers.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::CalendarEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarSummary {
    pub id: String,
    pub event_count: usize,
}

/// Events keyed by calendar id. Uploads replace a calendar wholesale.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    calendars: Arc<DashMap<String, Vec<CalendarEvent>>>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `events` under `calendar_id`, returning the previous event count.
    pub fn replace(&self, calendar_id: &str, events: Vec<CalendarEvent>) -> Option<usize> {
        self.calendars
            .insert(calendar_id.to_string(), events)
            .map(|previous| previous.len())
    }

    pub fn remove(&self, calendar_id: &str) -> Option<Vec<CalendarEvent>> {
        self.calendars.remove(calendar_id).map(|(_, events)| events)
    }

    /// Stored calendars, sorted by id.
    pub fn summaries(&self) -> Vec<CalendarSummary> {
        let mut summaries: Vec<CalendarSummary> = self
            .calendars
            .iter()
            .map(|entry| CalendarSummary {
                id: entry.key().clone(),
                event_count: entry.value().len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Snapshot of every stored event, ordered by start then id so results
    /// do not depend on map iteration order.
    pub fn all_events(&self) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = self
            .calendars
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        events.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.id().cmp(b.id())));
        events
    }
}
