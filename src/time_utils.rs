// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time arithmetic and duration formatting.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Round to the nearest integer, with halves rounding toward positive infinity.
///
/// `f64::round` rounds halves away from zero, which differs for negative
/// values (-2.5 becomes -3 instead of -2).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Whole minutes between two timestamps, rounded.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    round_half_up((end - start).num_milliseconds() as f64 / 60_000.0)
}

/// Whole days between two timestamps, rounded.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    round_half_up((end - start).num_milliseconds() as f64 / 86_400_000.0)
}

/// First instant of a calendar day.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last millisecond of a calendar day (23:59:59.999).
///
/// The offset never leaves `date`, so this holds for `NaiveDate::MAX` too.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + (TimeDelta::days(1) - TimeDelta::milliseconds(1))
}

/// Current wall-clock time in the given display time zone.
pub fn now_in(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// A duration split into days, hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TimeBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

pub fn breakdown_minutes(total_minutes: i64) -> TimeBreakdown {
    TimeBreakdown {
        days: total_minutes.div_euclid(MINUTES_PER_DAY),
        hours: total_minutes.rem_euclid(MINUTES_PER_DAY) / MINUTES_PER_HOUR,
        minutes: total_minutes.rem_euclid(MINUTES_PER_HOUR),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Format as "1 Day, 2 Hours, 3 Minutes".
pub fn format_days_hours_minutes(total_minutes: i64) -> String {
    let TimeBreakdown {
        days,
        hours,
        minutes,
    } = breakdown_minutes(total_minutes);
    format!(
        "{}, {}, {}",
        plural(days, "Day"),
        plural(hours, "Hour"),
        plural(minutes, "Minute")
    )
}

/// Format as "26 Hours, 3 Minutes".
pub fn format_hours_minutes(total_minutes: i64) -> String {
    let TimeBreakdown {
        days,
        hours,
        minutes,
    } = breakdown_minutes(total_minutes);
    format!(
        "{}, {}",
        plural(days * 24 + hours, "Hour"),
        plural(minutes, "Minute")
    )
}

pub fn format_minutes(total_minutes: i64) -> String {
    plural(total_minutes, "Minute")
}
