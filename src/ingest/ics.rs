// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! iCalendar (ICS) uploads, parsed with the `ical` crate.

use chrono::{Days, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use std::collections::HashMap;
use std::io::BufReader;

use super::{event_id, normalize, IngestError, IngestReport, RawEvent};
use crate::models::CreateCalendarEventInput;
use crate::time_utils::start_of_day;

const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT: &str = "%Y%m%d";
const UNTITLED: &str = "Untitled";

/// Parse an ICS document into events for `calendar_id`.
///
/// Events that cannot be normalized are skipped and counted; only a document
/// the parser rejects outright is an error.
pub fn parse_ics(text: &str, calendar_id: &str, tz: Tz) -> Result<IngestReport, IngestError> {
    let parser = ical::IcalParser::new(BufReader::new(text.as_bytes()));
    let mut report = IngestReport::default();
    let mut uid_counts: HashMap<String, usize> = HashMap::new();
    let mut index = 0usize;

    for calendar in parser {
        let calendar = calendar.map_err(|e| IngestError::Parse(e.to_string()))?;

        for mut event in calendar.events {
            assign_unique_uid(&mut event, index, &mut uid_counts);
            index += 1;
            report.push(normalize(&RawEvent::Ics(event), calendar_id, tz), calendar_id);
        }
    }

    tracing::debug!(
        calendar_id,
        events = report.events.len(),
        skipped = report.skipped,
        "Parsed ICS document"
    );

    Ok(report)
}

/// Give every event in a document a distinct UID. Events without one get
/// their position; repeats (recurrence overrides) get a `-{n}` suffix.
fn assign_unique_uid(event: &mut IcalEvent, index: usize, seen: &mut HashMap<String, usize>) {
    let uid = property(event, "UID")
        .and_then(|p| p.value.as_deref())
        .map(str::trim)
        .filter(|uid| !uid.is_empty())
        .map_or_else(|| index.to_string(), str::to_string);

    let occurrences = seen.entry(uid.clone()).or_insert(0);
    *occurrences += 1;
    let unique = if *occurrences == 1 {
        uid
    } else {
        format!("{}-{}", uid, occurrences)
    };

    match event.properties.iter_mut().find(|p| p.name == "UID") {
        Some(existing) => existing.value = Some(unique),
        None => event.properties.push(Property {
            name: "UID".to_string(),
            params: None,
            value: Some(unique),
        }),
    }
}

pub(crate) fn event_input(
    event: &IcalEvent,
    calendar_id: &str,
    tz: Tz,
) -> Result<CreateCalendarEventInput, IngestError> {
    let uid = property(event, "UID")
        .and_then(|p| p.value.as_deref())
        .ok_or(IngestError::MissingField("UID"))?;

    let start = property(event, "DTSTART")
        .ok_or(IngestError::MissingField("DTSTART"))
        .and_then(|p| parse_time(p, tz))?;
    let end = match property(event, "DTEND") {
        Some(p) => parse_time(p, tz)?.at,
        None if start.all_day => start
            .at
            .checked_add_days(Days::new(1))
            .ok_or_else(|| IngestError::InvalidDate(start.at.to_string()))?,
        None => start.at,
    };

    let title = property(event, "SUMMARY")
        .and_then(|p| p.value.as_deref())
        .map(unescape_text)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    Ok(CreateCalendarEventInput {
        id: event_id(calendar_id, uid),
        calendar_id: calendar_id.to_string(),
        title,
        start: Some(start.at),
        end: Some(end),
        is_all_day: start.all_day,
    })
}

struct IcsTime {
    at: NaiveDateTime,
    all_day: bool,
}

/// Interpret a DTSTART/DTEND value in the display zone.
fn parse_time(prop: &Property, tz: Tz) -> Result<IcsTime, IngestError> {
    let raw = prop
        .value
        .as_deref()
        .map(str::trim)
        .ok_or(IngestError::MissingField("date value"))?;
    let invalid = || IngestError::InvalidDate(raw.to_string());

    let is_date = param(prop, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"));
    if is_date || raw.len() == 8 {
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;
        return Ok(IcsTime {
            at: start_of_day(date),
            all_day: true,
        });
    }

    if let Some(utc) = raw.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).map_err(|_| invalid())?;
        return Ok(IcsTime {
            at: Utc.from_utc_datetime(&naive).with_timezone(&tz).naive_local(),
            all_day: false,
        });
    }

    let naive = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).map_err(|_| invalid())?;
    let source_zone = param(prop, "TZID").and_then(|id| id.trim_matches('"').parse::<Tz>().ok());
    let at = match source_zone {
        Some(zone) => zone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(invalid)?
            .with_timezone(&tz)
            .naive_local(),
        // Floating time, or a TZID chrono-tz does not know
        None => naive,
    };

    Ok(IcsTime { at, all_day: false })
}

fn property<'a>(event: &'a IcalEvent, name: &str) -> Option<&'a Property> {
    event.properties.iter().find(|p| p.name == name)
}

fn param<'a>(prop: &'a Property, name: &str) -> Option<&'a str> {
    prop.params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// Undo RFC 5545 TEXT escaping. Line breaks become spaces.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push(' '),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
