// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Time-range filters and the data bounds they resolve against.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Time window selected in the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TimeFilter {
    Year {
        year: i32,
    },
    /// `month` is 1-based
    Month {
        year: i32,
        month: u32,
    },
    /// `week` is 1-based, counted from the first Monday of the month
    Week {
        year: i32,
        month: u32,
        week: u32,
    },
    #[default]
    Lifetime,
    Custom {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

/// Inclusive `[from, to]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    /// True if the range contains no instant at all.
    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.from && instant <= self.to
    }
}

/// Span of the full, unfiltered collection. Keeps navigation inside the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBounds {
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
}
