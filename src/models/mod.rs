// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod event;
pub mod exclusions;
pub mod filter;
pub mod quality;
pub mod stats;

pub use event::{CalendarEvent, CreateCalendarEventInput, EventError};
pub use exclusions::Exclusions;
pub use filter::{DataBounds, DateRange, TimeFilter};
pub use quality::{DataQualityIssue, IssueType, MergeSuggestion, Severity};
pub use stats::{
    ActivityOption, ActivityStats, Break, GlobalStats, LongestSession, SortBy, Streak, TopActivity,
};
