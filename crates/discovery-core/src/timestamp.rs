//! Timestamp parsing for provider date-time strings.
//!
//! Providers report times either as RFC 3339 strings with an offset
//! (`2024-03-01T13:45:30-05:00`, `2024-03-01T13:45:30Z`) or as naive
//! date-times (`2024-03-01T13:45:30`, `2024-03-01 13:45:30.123`). Times are
//! kept as the wall-clock reading in the provider's own offset.

use chrono::{DateTime, NaiveDateTime};

use crate::error::{DiscoveryError, Result};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Display format used for article headers.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses a provider timestamp into its wall-clock date-time.
///
/// # Errors
/// Returns [`DiscoveryError::MalformedTimestamp`] if no supported layout matches.
pub fn parse(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DiscoveryError::MalformedTimestamp(value.to_string()))
}

/// Reformats a provider timestamp as `YYYY-MM-DD HH:MM`, dropping seconds and offset.
///
/// # Errors
/// Returns [`DiscoveryError::MalformedTimestamp`] if the input cannot be parsed.
pub fn to_minute(value: &str) -> Result<String> {
    Ok(parse(value)?.format(MINUTE_FORMAT).to_string())
}
