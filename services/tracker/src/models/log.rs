//! Exercise log query parameters and response shape

use serde::{Deserialize, Serialize};

use super::{UserId, exercise::serialize_duration};

/// Raw query parameters of a log request
///
/// Kept as text so that malformed values are reported with the log-specific
/// validation messages rather than a generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// One formatted line of a user's log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    /// Calendar date such as `Sun Jan 01 2023`
    pub date: String,
}

/// Filtered and formatted view of a user's exercises
#[derive(Debug, Clone, Serialize)]
pub struct UserLog {
    pub id: UserId,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}
