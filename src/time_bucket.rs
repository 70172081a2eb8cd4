//! Time utilities for session bucketing and timestamp parsing
//!
//! Sessions are stored with a day bucket ("YYYY-MM-DD") next to their raw
//! timestamp so distinct-day counts and daily histograms stay cheap.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::error::{Error, Result};

/// Compute the day bucket string from a Unix timestamp in milliseconds.
///
/// Returns a string in format "YYYY-MM-DD".
pub fn day_bucket(timestamp_ms: i64) -> String {
    let dt = DateTime::from_timestamp_millis(timestamp_ms).unwrap_or_else(Utc::now);
    format!("{:04}-{:02}-{:02}", dt.year(), dt.month(), dt.day())
}

/// Get the current day bucket.
pub fn current_day_bucket() -> String {
    day_bucket(Utc::now().timestamp_millis())
}

/// Current time in ms since epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a practice timestamp into ms since epoch.
///
/// Accepts "YYYY-MM-DD HH:MM:SS" and the datetime-local form "YYYY-MM-DDTHH:MM".
pub fn parse_timestamp(s: &str) -> Result<i64> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map(|dt| dt.and_utc().timestamp_millis())
        .map_err(|_| Error::validation("Invalid date format"))
}

/// Whole days elapsed between a stored timestamp and now.
pub fn days_since(timestamp_ms: i64) -> i64 {
    let then = DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or_else(Utc::now)
        .date_naive();
    (Utc::now().date_naive() - then).num_days()
}
