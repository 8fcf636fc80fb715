// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data-quality detection.
//!
//! Each check runs independently over the full collection, so one event can
//! collect several issues (a zero-length birthday gets two).

use chrono::{Datelike, NaiveDateTime};
use std::collections::HashMap;

use crate::models::{CalendarEvent, DataQualityIssue, IssueType};
use crate::services::suggestions::normalize_name;
use crate::time_utils::end_of_day;

const BIRTHDAY_KEYWORDS: &[&str] = &[
    "birthday",
    "bday",
    "b-day",
    "born",
    "birth day",
    "'s birthday",
    "cumpleaños",
    "aniversário",
    "geburtstag",
];

const HOLIDAY_KEYWORDS: &[&str] = &[
    "holiday",
    "christmas",
    "thanksgiving",
    "easter",
    "new year",
    "independence day",
    "memorial day",
    "labor day",
    "halloween",
    "valentine",
    "mother's day",
    "father's day",
    "anniversary",
];

/// Thresholds and keyword lists for the heuristic checks.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityConfig {
    /// Durations above this many minutes are flagged
    pub long_duration_minutes: i64,
    /// A title must appear in at least this many distinct years to be recurring
    pub recurring_min_years: usize,
    /// ...and at most this many times per year on average
    pub recurring_max_per_year: f64,
    pub birthday_keywords: Vec<String>,
    pub holiday_keywords: Vec<String>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            long_duration_minutes: 24 * 60,
            recurring_min_years: 2,
            recurring_max_per_year: 3.0,
            birthday_keywords: BIRTHDAY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            holiday_keywords: HOLIDAY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl QualityConfig {
    pub fn is_birthday(&self, title: &str) -> bool {
        contains_any(title, &self.birthday_keywords)
    }

    pub fn is_holiday(&self, title: &str) -> bool {
        contains_any(title, &self.holiday_keywords)
    }
}

fn contains_any(title: &str, keywords: &[String]) -> bool {
    let lowered = title.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k.as_str()))
}

/// Flag anomalous events. `now` decides what counts as the future (anything
/// after the end of today).
pub fn detect_data_quality_issues(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    config: &QualityConfig,
) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();
    let today_end = end_of_day(now.date());

    for event in events.iter().filter(|e| e.start() > today_end) {
        issues.push(DataQualityIssue::new(
            IssueType::FutureEvent,
            event,
            format!("Event scheduled for {}", event.start().format("%Y-%m-%d")),
        ));
    }

    for event in events {
        let minutes = event.duration_minutes();
        if minutes <= 0 {
            issues.push(DataQualityIssue::new(
                IssueType::ZeroDuration,
                event,
                "Event has zero or negative duration",
            ));
        } else if minutes > config.long_duration_minutes {
            issues.push(DataQualityIssue::new(
                IssueType::LongDuration,
                event,
                format!("Event duration is {} hours ({} minutes)", minutes / 60, minutes),
            ));
        }
    }

    detect_duplicates(events, &mut issues);

    for event in events.iter().filter(|e| config.is_birthday(e.title())) {
        issues.push(DataQualityIssue::new(
            IssueType::Birthday,
            event,
            "This appears to be a birthday event. Consider excluding it from time tracking.",
        ));
    }

    detect_recurring_holidays(events, config, &mut issues);

    tracing::debug!(
        events = events.len(),
        issues = issues.len(),
        "Data quality scan complete"
    );

    issues
}

/// Same title, start and duration: every occurrence after the first is flagged.
fn detect_duplicates(events: &[CalendarEvent], issues: &mut Vec<DataQualityIssue>) {
    let groups = group_in_order(events, |e| {
        (e.title().to_string(), e.start(), e.duration_minutes())
    });

    for group in groups {
        for event in group.iter().skip(1) {
            issues.push(DataQualityIssue::new(
                IssueType::Duplicate,
                event,
                format!(
                    "Duplicate of \"{}\" at {}",
                    event.title(),
                    event.start().format("%Y-%m-%d %H:%M")
                ),
            ));
        }
    }
}

/// Titles appearing in several years, a few times each, that look like
/// holidays or birthdays.
fn detect_recurring_holidays(
    events: &[CalendarEvent],
    config: &QualityConfig,
    issues: &mut Vec<DataQualityIssue>,
) {
    for by_title in group_in_order(events, |e| normalize_name(e.title())) {
        let by_year = group_in_order(by_title.iter().copied(), |e| e.start().year());
        let years = by_year.len();
        if years < config.recurring_min_years {
            continue;
        }

        let avg_per_year = by_title.len() as f64 / years as f64;
        let first_title = by_title[0].title();
        let looks_special = config.is_holiday(first_title) || config.is_birthday(first_title);
        if avg_per_year > config.recurring_max_per_year || !looks_special {
            continue;
        }

        for event in by_year.iter().flatten() {
            issues.push(DataQualityIssue::new(
                IssueType::RecurringHoliday,
                event,
                format!(
                    "This event recurs yearly (appears in {} years). Likely a holiday or birthday.",
                    years
                ),
            ));
        }
    }
}

/// Group events by key, keeping first-seen order of groups and members.
fn group_in_order<'a, K, F>(
    events: impl IntoIterator<Item = &'a CalendarEvent>,
    key: F,
) -> Vec<Vec<&'a CalendarEvent>>
where
    K: std::hash::Hash + Eq,
    F: Fn(&CalendarEvent) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<&CalendarEvent>> = Vec::new();

    for event in events {
        let slot = *index.entry(key(event)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(event);
    }

    groups
}
