//! Input validation for user and exercise payloads

use chrono::{DateTime, Utc};

use crate::{
    dates,
    error::{ApiError, ApiResult},
    models::FieldValue,
};

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const DURATION_NOT_A_NUMBER: &str = "Duration must be a number";
pub const INVALID_DATE_FORMAT: &str = "Invalid date format";

/// Validate username
///
/// Only presence is checked; usernames are neither unique nor restricted in
/// format, so a whitespace-only name is accepted as given.
pub fn validate_username(username: Option<&str>) -> ApiResult<String> {
    match username {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ApiError::validation(USERNAME_REQUIRED)),
    }
}

/// Parse a number from a body field or query value
///
/// Whitespace around text is ignored. Empty text, non-finite values and
/// anything that is not a number yield `None`.
pub fn parse_number(value: &FieldValue) -> Option<f64> {
    let number = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(text) => text.trim().parse::<f64>().ok()?,
        FieldValue::Other(_) => return None,
    };

    number.is_finite().then_some(number)
}

/// Validate duration
///
/// Blank text counts as zero; a missing field is rejected.
pub fn parse_duration(duration: Option<&FieldValue>) -> ApiResult<f64> {
    match duration {
        Some(FieldValue::Text(text)) if text.trim().is_empty() => Ok(0.0),
        _ => duration
            .and_then(parse_number)
            .ok_or_else(|| ApiError::validation(DURATION_NOT_A_NUMBER)),
    }
}

/// Resolve the date of a new exercise
///
/// A missing, blank, zero or `false` date means `now`. Other numbers are
/// epoch milliseconds.
pub fn parse_exercise_date(
    date: Option<&FieldValue>,
    now: DateTime<Utc>,
) -> ApiResult<DateTime<Utc>> {
    let parsed = match date {
        None => Some(now),
        Some(FieldValue::Text(text)) if text.trim().is_empty() => Some(now),
        Some(FieldValue::Text(text)) => dates::parse_date(text),
        Some(FieldValue::Number(millis)) if *millis == 0.0 => Some(now),
        Some(FieldValue::Number(millis)) => dates::from_epoch_millis(*millis),
        Some(FieldValue::Other(serde_json::Value::Null | serde_json::Value::Bool(false))) => {
            Some(now)
        }
        Some(FieldValue::Other(_)) => None,
    };

    parsed.ok_or_else(|| ApiError::validation(INVALID_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    fn message(error: ApiError) -> String {
        match error {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(Some("fcc_test")).unwrap(), "fcc_test");
        assert_eq!(
            message(validate_username(None).unwrap_err()),
            USERNAME_REQUIRED
        );
        assert_eq!(
            message(validate_username(Some("")).unwrap_err()),
            USERNAME_REQUIRED
        );
    }

    #[test]
    fn test_whitespace_username_is_kept_as_given() {
        assert_eq!(validate_username(Some("  ")).unwrap(), "  ");
    }

    #[test]
    fn test_parse_duration_accepts_numbers_and_numeric_text() {
        assert_eq!(parse_duration(Some(&FieldValue::Number(30.0))).unwrap(), 30.0);
        assert_eq!(parse_duration(Some(&text("45"))).unwrap(), 45.0);
        assert_eq!(parse_duration(Some(&text(" 12.5 "))).unwrap(), 12.5);
        assert_eq!(parse_duration(Some(&text("-3"))).unwrap(), -3.0);
    }

    #[test]
    fn test_blank_duration_is_zero() {
        assert_eq!(parse_duration(Some(&text(""))).unwrap(), 0.0);
        assert_eq!(parse_duration(Some(&text("   "))).unwrap(), 0.0);
    }

    #[test]
    fn test_parse_duration_rejects_non_numbers() {
        for value in [text("abc"), text("12abc"), text("inf"), text("NaN")] {
            assert_eq!(
                message(parse_duration(Some(&value)).unwrap_err()),
                DURATION_NOT_A_NUMBER
            );
        }
        assert_eq!(
            message(parse_duration(None).unwrap_err()),
            DURATION_NOT_A_NUMBER
        );
        assert_eq!(
            message(parse_duration(Some(&FieldValue::Other(serde_json::json!([1])))).unwrap_err()),
            DURATION_NOT_A_NUMBER
        );
    }

    #[test]
    fn test_parse_exercise_date_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        assert_eq!(parse_exercise_date(None, now).unwrap(), now);
        assert_eq!(parse_exercise_date(Some(&text("")), now).unwrap(), now);
        assert_eq!(
            parse_exercise_date(Some(&FieldValue::Other(serde_json::Value::Null)), now).unwrap(),
            now
        );
    }

    #[test]
    fn test_falsy_dates_mean_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        assert_eq!(
            parse_exercise_date(Some(&FieldValue::Number(0.0)), now).unwrap(),
            now
        );
        assert_eq!(
            parse_exercise_date(Some(&FieldValue::Other(serde_json::json!(false))), now).unwrap(),
            now
        );
    }

    #[test]
    fn test_parse_exercise_date_reads_supplied_dates() {
        let now = Utc::now();
        assert_eq!(
            parse_exercise_date(Some(&text("2023-06-01")), now).unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_exercise_date(Some(&FieldValue::Number(1_672_531_200_000.0)), now).unwrap(),
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_exercise_date_rejects_garbage() {
        let now = Utc::now();
        assert_eq!(
            message(parse_exercise_date(Some(&text("not-a-date")), now).unwrap_err()),
            INVALID_DATE_FORMAT
        );
        assert_eq!(
            message(
                parse_exercise_date(Some(&FieldValue::Other(serde_json::json!(true))), now)
                    .unwrap_err()
            ),
            INVALID_DATE_FORMAT
        );
    }
}
