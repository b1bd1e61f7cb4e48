//! Exercise log query pipeline
//!
//! A log request narrows a user's exercises in three cumulative steps, always
//! in this order:
//!
//! 1. keep entries dated on or after `from`
//! 2. keep entries dated on or before `to`
//! 3. keep the first `limit` survivors, in stored order
//!
//! Survivors are then rendered as [`LogEntry`] values with a calendar date.
//! `limit` is not "most recent N": entries are never re-sorted.

use chrono::{DateTime, Utc};

use crate::{
    dates,
    error::{ApiError, ApiResult},
    models::{Exercise, FieldValue, LogEntry, LogsQuery, User, UserLog},
    validation,
};

pub const INVALID_FROM_DATE: &str = "Invalid from date";
pub const INVALID_TO_DATE: &str = "Invalid to date";
pub const INVALID_LIMIT: &str = "Limit must be a positive number";

/// Parsed and validated log filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl LogFilter {
    /// Validate raw query values. Blank values count as absent.
    pub fn parse(query: &LogsQuery) -> ApiResult<Self> {
        let from = parse_bound(query.from.as_deref(), INVALID_FROM_DATE)?;
        let to = parse_bound(query.to.as_deref(), INVALID_TO_DATE)?;

        let limit = present(query.limit.as_deref()).map(parse_limit).transpose()?;

        Ok(Self { from, to, limit })
    }

    /// Whether an entry survives the date range
    pub fn in_range(&self, exercise: &Exercise) -> bool {
        self.from.is_none_or(|from| exercise.date >= from)
            && self.to.is_none_or(|to| exercise.date <= to)
    }

    /// Filter then truncate, preserving stored order
    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        exercises
            .iter()
            .filter(|exercise| self.in_range(exercise))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn parse_bound(raw: Option<&str>, message: &str) -> ApiResult<Option<DateTime<Utc>>> {
    present(raw)
        .map(|raw| dates::parse_date(raw).ok_or_else(|| ApiError::validation(message)))
        .transpose()
}

/// Parse a limit: any positive number, fractions truncated toward zero
fn parse_limit(raw: &str) -> ApiResult<usize> {
    let limit = validation::parse_number(&FieldValue::Text(raw.to_string()))
        .or_else(|| (raw.trim() == "Infinity").then_some(f64::INFINITY))
        .filter(|limit| *limit > 0.0)
        .ok_or_else(|| ApiError::validation(INVALID_LIMIT))?;

    // Float to int casts saturate, so infinity becomes usize::MAX
    Ok(limit.trunc() as usize)
}

/// Render one stored exercise as a log line
pub fn to_log_entry(exercise: &Exercise) -> LogEntry {
    LogEntry {
        description: exercise.description.clone(),
        duration: exercise.duration,
        date: dates::format_log_date(&exercise.date),
    }
}

/// Build the log view of a user for an already validated filter
pub fn build_log(user: &User, filter: &LogFilter) -> UserLog {
    let log: Vec<LogEntry> = filter
        .apply(&user.exercises)
        .into_iter()
        .map(to_log_entry)
        .collect();

    UserLog {
        id: user.id,
        username: user.username.clone(),
        count: log.len(),
        log,
    }
}
