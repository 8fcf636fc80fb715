// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calendar Insights: statistics over time spent in calendar events
//!
//! This crate ingests ICS files and Google Calendar exports, normalizes them
//! into one event model, and computes activity statistics, time distributions,
//! data-quality issues and merge suggestions over a selected time window.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::QualityConfig;
use store::CalendarStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: CalendarStore,
    pub quality: QualityConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let quality = config.quality_config();
        Self {
            config,
            store: CalendarStore::new(),
            quality,
        }
    }
}
