// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Global, per-activity and top-N statistics.
//!
//! None of these filter by time; callers select events first.

use chrono::{NaiveDate, TimeDelta};
use std::collections::{HashMap, HashSet};

use crate::models::{
    ActivityStats, Break, CalendarEvent, GlobalStats, LongestSession, SortBy, Streak, TopActivity,
};
use crate::time_utils::{days_between, round_half_up};

pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Count, distinct titles and total minutes.
pub fn compute_global_stats(events: &[CalendarEvent]) -> GlobalStats {
    let unique_titles: HashSet<&str> = events.iter().map(CalendarEvent::title).collect();

    GlobalStats {
        total_count: events.len(),
        unique_activities: unique_titles.len(),
        total_minutes: total_minutes(events.iter()),
    }
}

/// Stats over events whose title contains `search` (case-insensitive).
pub fn compute_activity_stats(events: &[CalendarEvent], search: &str) -> ActivityStats {
    let needle = search.to_lowercase();
    let mut matched: Vec<&CalendarEvent> = events
        .iter()
        .filter(|event| event.title().to_lowercase().contains(&needle))
        .collect();

    if matched.is_empty() {
        return ActivityStats {
            name: search.to_string(),
            ..Default::default()
        };
    }

    let total_count = matched.len();
    let total_minutes = total_minutes(matched.iter().copied());

    // First event with the maximum duration wins, in input order
    let longest = matched
        .iter()
        .copied()
        .reduce(|longest, current| {
            if current.duration_minutes() > longest.duration_minutes() {
                current
            } else {
                longest
            }
        })
        .map(|event| LongestSession {
            minutes: event.duration_minutes(),
            date: event.start(),
        });

    // Stable sort keeps input order for identical starts
    matched.sort_by_key(|event| event.start());

    ActivityStats {
        name: search.to_string(),
        total_count,
        total_minutes,
        first_session: matched.first().map(|e| e.start()),
        last_session: matched.last().map(|e| e.start()),
        average_session_minutes: average(total_minutes, total_count),
        longest_session: longest,
        longest_streak: longest_streak(&matched),
        biggest_break: biggest_break(&matched),
    }
}

/// Longest run of consecutive days, counting each day once.
///
/// On equal lengths the earliest run is kept.
fn longest_streak(sorted: &[&CalendarEvent]) -> Option<Streak> {
    let mut days: Vec<NaiveDate> = sorted.iter().map(|event| event.start().date()).collect();
    days.sort_unstable();
    days.dedup();

    let (&first, rest) = days.split_first()?;
    let mut best = Streak {
        days: 1,
        from: first,
        to: first,
    };
    let mut current = best.clone();

    for &day in rest {
        if day - current.to == TimeDelta::days(1) {
            current.days += 1;
            current.to = day;
        } else {
            if current.days > best.days {
                best = current;
            }
            current = Streak {
                days: 1,
                from: day,
                to: day,
            };
        }
    }

    if current.days > best.days {
        best = current;
    }
    Some(best)
}

/// Largest gap in days between adjacent event starts. `None` for fewer than two events.
fn biggest_break(sorted: &[&CalendarEvent]) -> Option<Break> {
    let mut biggest: Option<Break> = None;

    for pair in sorted.windows(2) {
        let (prev, current) = (pair[0].start(), pair[1].start());
        let days = days_between(prev, current);
        if biggest.as_ref().is_none_or(|b| days > b.days) {
            biggest = Some(Break {
                days,
                from: prev,
                to: current,
            });
        }
    }

    biggest
}

/// Rank activities by exact title.
///
/// Ties keep the order in which each title was first seen.
pub fn compute_top_activities(
    events: &[CalendarEvent],
    sort_by: SortBy,
    limit: usize,
) -> Vec<TopActivity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut activities: Vec<TopActivity> = Vec::new();

    for event in events {
        let slot = *index.entry(event.title()).or_insert_with(|| {
            activities.push(TopActivity {
                name: event.title().to_string(),
                count: 0,
                total_minutes: 0,
                longest_session_minutes: i64::MIN,
                average_session_minutes: 0,
            });
            activities.len() - 1
        });

        let activity = &mut activities[slot];
        activity.count += 1;
        activity.total_minutes += event.duration_minutes();
        activity.longest_session_minutes = activity
            .longest_session_minutes
            .max(event.duration_minutes());
    }

    for activity in &mut activities {
        activity.average_session_minutes = average(activity.total_minutes, activity.count);
    }

    match sort_by {
        SortBy::Count => activities.sort_by(|a, b| b.count.cmp(&a.count)),
        SortBy::Time => activities.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes)),
    }

    activities.truncate(limit);
    activities
}

fn total_minutes<'a>(events: impl Iterator<Item = &'a CalendarEvent>) -> i64 {
    events.map(CalendarEvent::duration_minutes).sum()
}

fn average(total_minutes: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    round_half_up(total_minutes as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCalendarEventInput;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn event(id: &str, title: &str, start: NaiveDateTime, minutes: i64) -> CalendarEvent {
        CalendarEvent::new(CreateCalendarEventInput {
            id: id.to_string(),
            calendar_id: "cal".to_string(),
            title: title.to_string(),
            start: Some(start),
            end: Some(start + TimeDelta::minutes(minutes)),
            is_all_day: false,
        })
        .unwrap()
    }

    #[test]
    fn test_global_stats_empty() {
        assert_eq!(compute_global_stats(&[]), GlobalStats::default());
    }

    #[test]
    fn test_global_stats() {
        let events = vec![
            event("1", "Run", at(2025, 1, 1, 8), 30),
            event("2", "Run", at(2025, 1, 2, 8), 45),
            event("3", "Read", at(2025, 1, 2, 20), 60),
        ];
        let stats = compute_global_stats(&events);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.unique_activities, 2);
        assert_eq!(stats.total_minutes, 135);
    }

    #[test]
    fn test_activity_stats_no_match() {
        let events = vec![event("1", "Run", at(2025, 1, 1, 8), 30)];
        let stats = compute_activity_stats(&events, "swim");
        assert_eq!(stats.name, "swim");
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.average_session_minutes, 0);
        assert!(stats.first_session.is_none());
        assert!(stats.longest_session.is_none());
        assert!(stats.longest_streak.is_none());
        assert!(stats.biggest_break.is_none());
    }

    #[test]
    fn test_activity_stats_case_insensitive_substring() {
        let events = vec![
            event("1", "Morning Run", at(2025, 1, 1, 8), 30),
            event("2", "RUN club", at(2025, 1, 2, 8), 60),
            event("3", "Reading", at(2025, 1, 2, 20), 60),
        ];
        let stats = compute_activity_stats(&events, "run");
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_minutes, 90);
        assert_eq!(stats.average_session_minutes, 45);
    }

    #[test]
    fn test_streak_and_break() {
        let events = vec![
            event("4", "Gym", at(2025, 1, 10, 9), 60),
            event("1", "Gym", at(2025, 1, 1, 9), 30),
            event("2", "Gym", at(2025, 1, 2, 9), 40),
            event("2b", "Gym", at(2025, 1, 2, 18), 20),
            event("3", "Gym", at(2025, 1, 3, 9), 50),
        ];
        let stats = compute_activity_stats(&events, "gym");

        let streak = stats.longest_streak.unwrap();
        assert_eq!(streak.days, 3);
        assert_eq!(streak.from, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(streak.to, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());

        let gap = stats.biggest_break.unwrap();
        assert_eq!(gap.days, 7);
        assert_eq!(gap.from, at(2025, 1, 3, 9));
        assert_eq!(gap.to, at(2025, 1, 10, 9));

        assert_eq!(stats.first_session, Some(at(2025, 1, 1, 9)));
        assert_eq!(stats.last_session, Some(at(2025, 1, 10, 9)));
        assert_eq!(
            stats.longest_session,
            Some(LongestSession {
                minutes: 60,
                date: at(2025, 1, 10, 9)
            })
        );
    }

    #[test]
    fn test_streak_ties_keep_earliest() {
        let events = vec![
            event("1", "Yoga", at(2025, 1, 1, 9), 30),
            event("2", "Yoga", at(2025, 1, 2, 9), 30),
            event("3", "Yoga", at(2025, 1, 5, 9), 30),
            event("4", "Yoga", at(2025, 1, 6, 9), 30),
        ];
        let streak = compute_activity_stats(&events, "yoga").longest_streak.unwrap();
        assert_eq!(streak.days, 2);
        assert_eq!(streak.from, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_trailing_streak_counted() {
        let events = vec![
            event("1", "Yoga", at(2025, 1, 1, 9), 30),
            event("2", "Yoga", at(2025, 1, 5, 9), 30),
            event("3", "Yoga", at(2025, 1, 6, 9), 30),
            event("4", "Yoga", at(2025, 1, 7, 9), 30),
        ];
        let streak = compute_activity_stats(&events, "yoga").longest_streak.unwrap();
        assert_eq!(streak.days, 3);
        assert_eq!(streak.to, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
    }

    #[test]
    fn test_streak_across_month_and_leap_day() {
        let events = vec![
            event("1", "Walk", at(2024, 2, 28, 9), 30),
            event("2", "Walk", at(2024, 2, 29, 9), 30),
            event("3", "Walk", at(2024, 3, 1, 9), 30),
        ];
        let streak = compute_activity_stats(&events, "walk").longest_streak.unwrap();
        assert_eq!(streak.days, 3);
    }

    #[test]
    fn test_single_event_has_streak_but_no_break() {
        let events = vec![event("1", "Walk", at(2024, 2, 28, 9), 30)];
        let stats = compute_activity_stats(&events, "walk");
        assert_eq!(stats.longest_streak.unwrap().days, 1);
        assert!(stats.biggest_break.is_none());
    }

    #[test]
    fn test_longest_session_first_encountered_on_tie() {
        let events = vec![
            event("1", "Walk", at(2024, 3, 2, 9), 30),
            event("2", "Walk", at(2024, 3, 1, 9), 30),
        ];
        let stats = compute_activity_stats(&events, "walk");
        assert_eq!(stats.longest_session.unwrap().date, at(2024, 3, 2, 9));
    }

    #[test]
    fn test_top_activities_by_time() {
        let events = vec![
            event("1", "A", at(2025, 1, 1, 8), 10),
            event("2", "A", at(2025, 1, 2, 8), 20),
            event("3", "B", at(2025, 1, 3, 8), 5),
        ];
        let top = compute_top_activities(&events, SortBy::Time, 2);
        assert_eq!(
            top,
            vec![
                TopActivity {
                    name: "A".to_string(),
                    count: 2,
                    total_minutes: 30,
                    longest_session_minutes: 20,
                    average_session_minutes: 15,
                },
                TopActivity {
                    name: "B".to_string(),
                    count: 1,
                    total_minutes: 5,
                    longest_session_minutes: 5,
                    average_session_minutes: 5,
                },
            ]
        );
    }

    #[test]
    fn test_top_activities_case_sensitive_and_stable() {
        let events = vec![
            event("1", "run", at(2025, 1, 1, 8), 10),
            event("2", "Run", at(2025, 1, 2, 8), 10),
            event("3", "Swim", at(2025, 1, 3, 8), 10),
            event("4", "Swim", at(2025, 1, 4, 8), 10),
        ];
        let top = compute_top_activities(&events, SortBy::Count, 10);
        let names: Vec<&str> = top.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Swim", "run", "Run"]);

        let limited = compute_top_activities(&events, SortBy::Count, 1);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let events = vec![
            event("1", "Gym", at(2025, 1, 1, 9), 30),
            event("2", "Gym", at(2025, 1, 4, 9), 30),
        ];
        assert_eq!(
            compute_activity_stats(&events, "gym"),
            compute_activity_stats(&events, "gym")
        );
        assert_eq!(
            compute_top_activities(&events, SortBy::Time, 5),
            compute_top_activities(&events, SortBy::Time, 5)
        );
    }
}
