// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Apply caller-supplied exclusions before computing statistics.

use chrono::NaiveDateTime;
use std::collections::HashSet;

use crate::models::{CalendarEvent, Exclusions};
use crate::services::quality::{detect_data_quality_issues, QualityConfig};

/// Drop removed events, apply title merges, then drop hidden titles and
/// events carrying a hidden issue.
///
/// Issues are detected after merging, so issue keys refer to merged titles.
pub fn apply_exclusions(
    events: &[CalendarEvent],
    exclusions: &Exclusions,
    now: NaiveDateTime,
    quality: &QualityConfig,
) -> Vec<CalendarEvent> {
    if exclusions.is_empty() {
        return events.to_vec();
    }

    let merged: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| !exclusions.removed_event_ids.contains(e.id()))
        .map(|e| match exclusions.title_merges.get(e.title()) {
            Some(target) => e.with_title(target.as_str()),
            None => e.clone(),
        })
        .collect();

    let hidden_by_issue: HashSet<String> = if exclusions.hidden_issue_keys.is_empty() {
        HashSet::new()
    } else {
        detect_data_quality_issues(&merged, now, quality)
            .into_iter()
            .filter(|issue| exclusions.hidden_issue_keys.contains(&issue.key()))
            .map(|issue| issue.event.id().to_string())
            .collect()
    };

    let kept: Vec<CalendarEvent> = merged
        .into_iter()
        .filter(|e| !exclusions.hidden_titles.contains(e.title()))
        .filter(|e| !hidden_by_issue.contains(e.id()))
        .collect();

    tracing::debug!(
        input = events.len(),
        kept = kept.len(),
        "Applied exclusions"
    );

    kept
}
