// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time-range resolution and event selection.
//!
//! Every range is capped at `now`, so future events are never selected.
//! `now` is passed in explicitly rather than read from the clock here.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

use crate::models::{CalendarEvent, DataBounds, DateRange, TimeFilter};
use crate::time_utils::{end_of_day, start_of_day};

/// Resolve a filter to an inclusive range, clamped to the data bounds and to `now`.
///
/// The returned range may be empty (`to < from`), e.g. for a future month.
pub fn resolve_range(
    filter: &TimeFilter,
    now: NaiveDateTime,
    bounds: &DataBounds,
) -> Result<DateRange, FilterError> {
    let DateRange { mut from, mut to } = period_range(filter)?;

    if let Some(min) = bounds.min {
        from = from.max(min);
    }
    if let Some(max) = bounds.max {
        to = to.min(max);
    }
    to = to.min(now);

    Ok(DateRange { from, to })
}

/// Unclamped range of the period a filter names.
fn period_range(filter: &TimeFilter) -> Result<DateRange, FilterError> {
    match *filter {
        TimeFilter::Lifetime => Ok(DateRange {
            from: NaiveDateTime::MIN,
            to: NaiveDateTime::MAX,
        }),
        TimeFilter::Year { year } => {
            let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(FilterError::InvalidDate)?;
            let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(FilterError::InvalidDate)?;
            Ok(DateRange {
                from: start_of_day(first),
                to: end_of_day(last),
            })
        }
        TimeFilter::Month { year, month } => {
            let first = first_of_month(year, month)?;
            let last = last_of_month(first)?;
            Ok(DateRange {
                from: start_of_day(first),
                to: end_of_day(last),
            })
        }
        TimeFilter::Week { year, month, week } => {
            if week == 0 {
                return Err(FilterError::InvalidWeek(week));
            }
            let first_monday = first_monday_of_month(year, month)?;
            let week_start = first_monday
                .checked_add_days(Days::new(7 * u64::from(week - 1)))
                .ok_or(FilterError::InvalidDate)?;
            let week_end = week_start
                .checked_add_days(Days::new(6))
                .ok_or(FilterError::InvalidDate)?;
            Ok(DateRange {
                from: start_of_day(week_start),
                to: end_of_day(week_end),
            })
        }
        TimeFilter::Custom { from, to } => Ok(DateRange { from, to }),
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, FilterError> {
    if !(1..=12).contains(&month) {
        return Err(FilterError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(FilterError::InvalidDate)
}

fn last_of_month(first: NaiveDate) -> Result<NaiveDate, FilterError> {
    if first.month() == 12 {
        // No next month to step back from in the last representable year
        return NaiveDate::from_ymd_opt(first.year(), 12, 31).ok_or(FilterError::InvalidDate);
    }
    // Day 0 of the next month
    first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or(FilterError::InvalidDate)
}

/// First Monday on or after the 1st of the month.
pub fn first_monday_of_month(year: i32, month: u32) -> Result<NaiveDate, FilterError> {
    let first = first_of_month(year, month)?;
    let offset = (7 - first.weekday().num_days_from_monday()) % 7;
    first
        .checked_add_days(Days::new(u64::from(offset)))
        .ok_or(FilterError::InvalidDate)
}

/// Events whose start falls inside the resolved range.
///
/// Invalid filters and empty ranges select nothing.
pub fn select_events(
    events: &[CalendarEvent],
    filter: &TimeFilter,
    now: NaiveDateTime,
    bounds: &DataBounds,
) -> Vec<CalendarEvent> {
    let range = match resolve_range(filter, now, bounds) {
        Ok(range) => range,
        Err(e) => {
            tracing::debug!(error = %e, ?filter, "Invalid time filter, selecting nothing");
            return Vec::new();
        }
    };

    if range.is_empty() {
        return Vec::new();
    }

    events
        .iter()
        .filter(|event| range.contains(event.start()))
        .cloned()
        .collect()
}

/// Events belonging to any of the given calendars.
pub fn filter_by_calendars(events: &[CalendarEvent], calendar_ids: &[String]) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|event| calendar_ids.iter().any(|id| id == event.calendar_id()))
        .cloned()
        .collect()
}

pub fn first_event_date(events: &[CalendarEvent]) -> Option<NaiveDateTime> {
    events.iter().map(CalendarEvent::start).min()
}

pub fn last_event_date(events: &[CalendarEvent]) -> Option<NaiveDateTime> {
    events.iter().map(CalendarEvent::start).max()
}

impl DataBounds {
    /// Earliest and latest event start of the full collection.
    pub fn from_events(events: &[CalendarEvent]) -> Self {
        Self {
            min: first_event_date(events),
            max: last_event_date(events),
        }
    }
}

/// Errors for structurally impossible filters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Week must be 1 or greater, got {0}")]
    InvalidWeek(u32),

    #[error("Date is outside the supported calendar range")]
    InvalidDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCalendarEventInput;
    use chrono::TimeDelta;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime) -> CalendarEvent {
        event_in("cal", id, start)
    }

    fn event_in(calendar_id: &str, id: &str, start: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::new(CreateCalendarEventInput {
            id: id.to_string(),
            calendar_id: calendar_id.to_string(),
            title: "Run".to_string(),
            start: Some(start),
            end: Some(start + TimeDelta::minutes(30)),
            is_all_day: false,
        })
        .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2025, 6, 15, 12, 0)
    }

    #[test]
    fn test_year_range_in_past() {
        let range = resolve_range(&TimeFilter::Year { year: 2024 }, now(), &DataBounds::default())
            .unwrap();
        assert_eq!(range.from, at(2024, 1, 1, 0, 0));
        assert_eq!(range.to.to_string(), "2024-12-31 23:59:59.999");
    }

    #[test]
    fn test_current_year_clamped_to_now() {
        let range = resolve_range(&TimeFilter::Year { year: 2025 }, now(), &DataBounds::default())
            .unwrap();
        assert_eq!(range.to, now());
    }

    #[test]
    fn test_future_year_is_empty() {
        let range = resolve_range(&TimeFilter::Year { year: 2026 }, now(), &DataBounds::default())
            .unwrap();
        assert!(range.is_empty());

        let events = vec![event("a", at(2026, 3, 1, 9, 0))];
        assert!(select_events(&events, &TimeFilter::Year { year: 2026 }, now(), &DataBounds::default()).is_empty());
    }

    #[test]
    fn test_last_representable_year_does_not_overflow() {
        let year = NaiveDate::MAX.year();
        let far_future = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();

        let range = resolve_range(&TimeFilter::Year { year }, far_future, &DataBounds::default())
            .unwrap();
        assert_eq!(range.to, far_future);

        let december = TimeFilter::Month { year, month: 12 };
        let range = resolve_range(&december, now(), &DataBounds::default()).unwrap();
        assert!(range.is_empty());

        let events = vec![event("a", at(2024, 3, 1, 9, 0))];
        assert!(select_events(&events, &TimeFilter::Year { year }, now(), &DataBounds::default())
            .is_empty());
        assert_eq!(
            resolve_range(
                &TimeFilter::Week { year, month: 12, week: 5 },
                now(),
                &DataBounds::default()
            ),
            Err(FilterError::InvalidDate)
        );
    }

    #[test]
    fn test_month_handles_leap_february() {
        let leap = resolve_range(
            &TimeFilter::Month {
                year: 2024,
                month: 2,
            },
            now(),
            &DataBounds::default(),
        )
        .unwrap();
        assert_eq!(leap.to.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let common = resolve_range(
            &TimeFilter::Month {
                year: 2023,
                month: 2,
            },
            now(),
            &DataBounds::default(),
        )
        .unwrap();
        assert_eq!(common.to.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_december_month_range() {
        let range = resolve_range(
            &TimeFilter::Month {
                year: 2024,
                month: 12,
            },
            now(),
            &DataBounds::default(),
        )
        .unwrap();
        assert_eq!(range.from, at(2024, 12, 1, 0, 0));
        assert_eq!(range.to.date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_month_boundaries_inclusive_exclusive() {
        let events = vec![
            event("first", at(2025, 3, 1, 0, 0)),
            event("next", at(2025, 4, 1, 0, 0)),
            event("before", at(2025, 2, 28, 23, 59)),
        ];
        let selected = select_events(
            &events,
            &TimeFilter::Month {
                year: 2025,
                month: 3,
            },
            now(),
            &DataBounds::default(),
        );
        let ids: Vec<&str> = selected.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["first"]);
    }

    #[test]
    fn test_first_monday_when_first_is_monday() {
        // 2024-07-01 is a Monday
        assert_eq!(
            first_monday_of_month(2024, 7).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
        // 2025-06-01 is a Sunday
        assert_eq!(
            first_monday_of_month(2025, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        // 2025-01-01 is a Wednesday
        assert_eq!(
            first_monday_of_month(2025, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_week_range() {
        let range = resolve_range(
            &TimeFilter::Week {
                year: 2025,
                month: 1,
                week: 2,
            },
            now(),
            &DataBounds::default(),
        )
        .unwrap();
        assert_eq!(range.from, at(2025, 1, 13, 0, 0));
        assert_eq!(range.to.to_string(), "2025-01-19 23:59:59.999");
    }

    #[test]
    fn test_week_containing_now_clamped() {
        // First Monday of June 2025 is the 2nd; week 2 is 9th..15th
        let range = resolve_range(
            &TimeFilter::Week {
                year: 2025,
                month: 6,
                week: 2,
            },
            now(),
            &DataBounds::default(),
        )
        .unwrap();
        assert_eq!(range.from, at(2025, 6, 9, 0, 0));
        assert_eq!(range.to, now());
    }

    #[test]
    fn test_invalid_filters() {
        let bounds = DataBounds::default();
        assert_eq!(
            resolve_range(&TimeFilter::Month { year: 2025, month: 13 }, now(), &bounds),
            Err(FilterError::InvalidMonth(13))
        );
        assert_eq!(
            resolve_range(
                &TimeFilter::Week {
                    year: 2025,
                    month: 1,
                    week: 0
                },
                now(),
                &bounds
            ),
            Err(FilterError::InvalidWeek(0))
        );

        let events = vec![event("a", at(2025, 1, 1, 9, 0))];
        assert!(select_events(&events, &TimeFilter::Month { year: 2025, month: 0 }, now(), &bounds).is_empty());
    }

    #[test]
    fn test_custom_clamped_to_now() {
        let filter = TimeFilter::Custom {
            from: at(2025, 6, 1, 0, 0),
            to: at(2025, 12, 31, 0, 0),
        };
        let range = resolve_range(&filter, now(), &DataBounds::default()).unwrap();
        assert_eq!(range.from, at(2025, 6, 1, 0, 0));
        assert_eq!(range.to, now());
    }

    #[test]
    fn test_bounds_clamp_inward() {
        let events = vec![
            event("a", at(2024, 3, 10, 8, 0)),
            event("b", at(2024, 9, 20, 8, 0)),
        ];
        let bounds = DataBounds::from_events(&events);
        let range = resolve_range(&TimeFilter::Year { year: 2024 }, now(), &bounds).unwrap();
        assert_eq!(range.from, at(2024, 3, 10, 8, 0));
        assert_eq!(range.to, at(2024, 9, 20, 8, 0));

        let selected = select_events(&events, &TimeFilter::Year { year: 2024 }, now(), &bounds);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_lifetime_excludes_future() {
        let events = vec![
            event("past", at(2020, 1, 1, 9, 0)),
            event("now", now()),
            event("future", at(2025, 6, 15, 12, 1)),
        ];
        let selected = select_events(&events, &TimeFilter::Lifetime, now(), &DataBounds::default());
        let ids: Vec<&str> = selected.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["past", "now"]);
    }

    #[test]
    fn test_filter_by_calendars() {
        let events = vec![
            event("a", at(2025, 1, 1, 8, 0)),
            event_in("career", "b", at(2025, 1, 1, 9, 0)),
        ];

        let selected = filter_by_calendars(&events, &["career".to_string()]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id(), "b");
    }

    #[test]
    fn test_first_and_last_event_date() {
        assert_eq!(first_event_date(&[]), None);
        let events = vec![
            event("b", at(2025, 2, 1, 8, 0)),
            event("a", at(2025, 1, 1, 8, 0)),
        ];
        assert_eq!(first_event_date(&events), Some(at(2025, 1, 1, 8, 0)));
        assert_eq!(last_event_date(&events), Some(at(2025, 2, 1, 8, 0)));
    }
}
