// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - analytics over normalized events.

pub mod activities;
pub mod distribution;
pub mod exclusions;
pub mod filter;
pub mod quality;
pub mod stats;
pub mod suggestions;

pub use activities::{search_activities, unique_activities};
pub use distribution::{
    by_hour_of_day, contribution_calendar, minutes_by_day_of_week, minutes_by_month, time_logged,
    ContributionDay, HourBucket, Interval, TimeBucket,
};
pub use exclusions::apply_exclusions;
pub use filter::{filter_by_calendars, resolve_range, select_events, FilterError};
pub use quality::{detect_data_quality_issues, QualityConfig};
pub use stats::{compute_activity_stats, compute_global_stats, compute_top_activities};
pub use suggestions::{generate_merge_suggestions, similarity};
