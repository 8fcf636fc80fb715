//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use chrono_tz::Tz;
use std::env;
use std::str::FromStr;

use crate::services::quality::QualityConfig;
use crate::services::suggestions::DEFAULT_SIMILARITY_THRESHOLD;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Zone in which event wall-clock times are interpreted
    pub display_timezone: Tz,
    /// Largest accepted calendar upload
    pub max_upload_bytes: usize,
    /// Default threshold for merge suggestions
    pub merge_similarity_threshold: f64,

    // --- Data-quality heuristics ---
    pub long_duration_minutes: i64,
    pub recurring_max_per_year: f64,
    pub recurring_min_years: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        let quality = QualityConfig::default();
        Self {
            port: DEFAULT_PORT,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            display_timezone: Tz::UTC,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            merge_similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            long_duration_minutes: quality.long_duration_minutes,
            recurring_max_per_year: quality.recurring_max_per_year,
            recurring_min_years: quality.recurring_min_years,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables take
    /// their defaults; set but unparsable ones are errors.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let display_timezone = match lookup("DISPLAY_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid("DISPLAY_TIMEZONE", name))?,
            None => defaults.display_timezone,
        };

        let config = Self {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            frontend_url: lookup("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            display_timezone,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            merge_similarity_threshold: parse_var(
                &lookup,
                "MERGE_SIMILARITY_THRESHOLD",
                defaults.merge_similarity_threshold,
            )?,
            long_duration_minutes: parse_var(
                &lookup,
                "LONG_DURATION_MINUTES",
                defaults.long_duration_minutes,
            )?,
            recurring_max_per_year: parse_var(
                &lookup,
                "RECURRING_MAX_PER_YEAR",
                defaults.recurring_max_per_year,
            )?,
            recurring_min_years: parse_var(
                &lookup,
                "RECURRING_MIN_YEARS",
                defaults.recurring_min_years,
            )?,
        };

        if !(0.0..=1.0).contains(&config.merge_similarity_threshold) {
            return Err(ConfigError::Invalid(
                "MERGE_SIMILARITY_THRESHOLD",
                config.merge_similarity_threshold.to_string(),
            ));
        }

        Ok(config)
    }

    /// Heuristic settings for data-quality detection.
    pub fn quality_config(&self) -> QualityConfig {
        QualityConfig {
            long_duration_minutes: self.long_duration_minutes,
            recurring_max_per_year: self.recurring_max_per_year,
            recurring_min_years: self.recurring_min_years,
            ..QualityConfig::default()
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
