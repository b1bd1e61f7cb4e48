//! Parsing of client supplied dates and rendering of log dates
//!
//! Inputs without an explicit offset are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%a %b %d %Y", "%B %d, %Y", "%b %d, %Y"];

/// Format used for the `date` field of log entries
pub const LOG_DATE_FORMAT: &str = "%a %b %d %Y";

/// Parse a date or timestamp, returning `None` when nothing matches
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(input, format) {
            return Some(date.and_utc());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| parse_partial_date(input))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// `YYYY` is January 1st, `YYYY-MM` is the first of the month
fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let is_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };

    let (year, month) = match input.split_once('-') {
        None => (input, "1"),
        Some((year, month)) if is_digits(month, 2) => (year, month),
        Some(_) => return None,
    };
    if !is_digits(year, 4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Interpret a number as milliseconds since the Unix epoch
pub fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// Render a date the way log entries show it, e.g. `Sun Jan 01 2023`
pub fn format_log_date(date: &DateTime<Utc>) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}
