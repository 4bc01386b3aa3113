//! Date parsing and formatting shared by front matter and template filters

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

/// Error for values that cannot be converted to a valid date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date input: {0}")]
    Invalid(String),
}

/// Parse a date string in various formats
///
/// Accepts the common `YYYY-MM-DD` / `YYYY/MM/DD` shapes with optional time,
/// plus RFC 3339 / ISO 8601.
pub fn parse(input: &str) -> Result<DateTime<Local>, DateError> {
    let s = input.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            if let Some(local) = dt.and_local_timezone(Local).earliest() {
                return Ok(local);
            }
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];

    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let midnight = d
                .and_hms_opt(0, 0, 0)
                .and_then(|dt| dt.and_local_timezone(Local).earliest());
            if let Some(local) = midnight {
                return Ok(local);
            }
        }
    }

    // RFC 3339 / ISO 8601 with explicit offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    Err(DateError::Invalid(s.to_string()))
}

/// Convert a Unix timestamp in seconds to a local date
pub fn from_epoch(secs: i64) -> Result<DateTime<Local>, DateError> {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| DateError::Invalid(secs.to_string()))
}

/// Format a date in long form, like "January 5, 2024"
pub fn format_long(date: &DateTime<Local>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in short form, like "Jan 5, 2024"
pub fn format_short(date: &DateTime<Local>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Extract the calendar year from a date string
///
/// The sentinel `"now"` yields the year of the supplied instant; callers that
/// need determinism pass a fixed `now`. Everything else goes through
/// [`parse`].
pub fn year_of(input: &str, now: DateTime<Local>) -> Result<i32, DateError> {
    if input.trim() == "now" {
        return Ok(now.year());
    }
    Ok(parse(input)?.year())
}
