// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time distributions behind the dashboard charts.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::CalendarEvent;
use crate::time_utils::end_of_day;

const MAX_CONTRIBUTION_LEVEL: u32 = 4;

/// Minutes logged in one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HourBucket {
    pub hour: u32,
    pub minutes: i64,
    pub count: usize,
}

/// One cell of the contributions heat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: usize,
    /// 0 (none) to 4 (busiest)
    pub level: u32,
}

/// Bucket width for the time-logged series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Interval {
    Daily,
    EveryFourDays,
    #[default]
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TimeBucket {
    pub start: NaiveDate,
    pub minutes: i64,
}

/// Minutes per weekday, Sunday first.
pub fn minutes_by_day_of_week(events: &[CalendarEvent]) -> [i64; 7] {
    let mut totals = [0; 7];
    for event in events {
        totals[event.day_of_week() as usize] += event.duration_minutes();
    }
    totals
}

/// Minutes and event counts per start hour (0-23).
pub fn by_hour_of_day(events: &[CalendarEvent]) -> Vec<HourBucket> {
    let mut buckets: Vec<HourBucket> = (0..24)
        .map(|hour| HourBucket {
            hour,
            minutes: 0,
            count: 0,
        })
        .collect();

    for event in events {
        let bucket = &mut buckets[event.start().hour() as usize];
        bucket.minutes += event.duration_minutes();
        bucket.count += 1;
    }
    buckets
}

/// Minutes per calendar month, January first.
pub fn minutes_by_month(events: &[CalendarEvent]) -> [i64; 12] {
    let mut totals = [0; 12];
    for event in events {
        totals[event.start().month0() as usize] += event.duration_minutes();
    }
    totals
}

/// Event counts for the `days` days ending at `today`, oldest first.
///
/// Levels scale against the busiest day inside the window.
pub fn contribution_calendar(
    events: &[CalendarEvent],
    today: NaiveDate,
    days: u64,
) -> Vec<ContributionDay> {
    let Some(first_day) = today.checked_sub_days(Days::new(days.saturating_sub(1))) else {
        return Vec::new();
    };

    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for event in events {
        let date = event.start().date();
        if date >= first_day && date <= today {
            *counts.entry(date).or_insert(0) += 1;
        }
    }
    let max_count = counts.values().copied().max().unwrap_or(0);

    first_day
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            let count = counts.get(&date).copied().unwrap_or(0);
            ContributionDay {
                date,
                count,
                level: contribution_level(count, max_count),
            }
        })
        .collect()
}

fn contribution_level(count: usize, max_count: usize) -> u32 {
    if count == 0 || max_count == 0 {
        return 0;
    }
    let scaled = (count as f64 / max_count as f64 * f64::from(MAX_CONTRIBUTION_LEVEL)).ceil();
    (scaled as u32).min(MAX_CONTRIBUTION_LEVEL)
}

/// Start date of the bucket containing `date`.
pub fn interval_start(date: NaiveDate, interval: Interval) -> NaiveDate {
    match interval {
        Interval::Daily => date,
        Interval::EveryFourDays => {
            let anchor = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);
            let offset = (date - anchor).num_days().div_euclid(4) * 4;
            anchor
                .checked_add_signed(TimeDelta::days(offset))
                .unwrap_or(date)
        }
        Interval::Weekly => date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .unwrap_or(date),
        Interval::Monthly => date.with_day(1).unwrap_or(date),
    }
}

/// Minutes logged per interval, ascending. Events after today are ignored and
/// empty buckets are omitted.
pub fn time_logged(
    events: &[CalendarEvent],
    interval: Interval,
    now: NaiveDateTime,
) -> Vec<TimeBucket> {
    let cutoff = end_of_day(now.date());
    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for event in events.iter().filter(|e| e.start() <= cutoff) {
        *buckets
            .entry(interval_start(event.start().date(), interval))
            .or_insert(0) += event.duration_minutes();
    }

    buckets
        .into_iter()
        .map(|(start, minutes)| TimeBucket { start, minutes })
        .collect()
}
