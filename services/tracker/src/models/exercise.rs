//! Exercise entries and the payloads used to log them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::UserId;

/// Largest integer an IEEE double represents exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Exercise entry embedded in a user's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    pub date: DateTime<Utc>,
}

/// A loosely typed body field: JSON clients may send numbers, form clients
/// always send text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Request for logging an exercise, accepted as JSON or form data
#[derive(Debug, Default, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<FieldValue>,
    #[serde(default)]
    pub date: Option<FieldValue>,
}

/// Response echoing the stored exercise
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseResponse {
    pub id: UserId,
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    pub date: DateTime<Utc>,
}

impl ExerciseResponse {
    pub fn new(id: UserId, exercise: Exercise) -> Self {
        Self {
            id,
            description: exercise.description,
            duration: exercise.duration,
            date: exercise.date,
        }
    }
}

/// Write whole durations as JSON integers (`30` rather than `30.0`)
pub fn serialize_duration<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn exercise(duration: f64) -> Exercise {
        Exercise {
            description: "run".to_string(),
            duration,
            date: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_whole_duration_serializes_as_integer() {
        let value = serde_json::to_value(exercise(30.0)).unwrap();
        assert_eq!(value["duration"], serde_json::json!(30));
        assert!(value["duration"].is_i64());
    }

    #[test]
    fn test_fractional_duration_is_kept() {
        let value = serde_json::to_value(exercise(12.5)).unwrap();
        assert_eq!(value["duration"], serde_json::json!(12.5));
    }

    #[test]
    fn test_stored_exercise_reads_back() {
        let stored = serde_json::to_string(&vec![exercise(45.0)]).unwrap();
        let decoded: Vec<Exercise> = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded, vec![exercise(45.0)]);
    }

    #[test]
    fn test_field_value_accepts_numbers_and_text() {
        let request: AddExerciseRequest =
            serde_json::from_str(r#"{"description":"swim","duration":20,"date":"2023-06-01"}"#)
                .unwrap();
        assert_eq!(request.duration, Some(FieldValue::Number(20.0)));
        assert_eq!(
            request.date,
            Some(FieldValue::Text("2023-06-01".to_string()))
        );

        let request: AddExerciseRequest =
            serde_json::from_str(r#"{"duration":true,"date":null}"#).unwrap();
        assert_eq!(
            request.duration,
            Some(FieldValue::Other(serde_json::Value::Bool(true)))
        );
        assert_eq!(request.date, None);
        assert_eq!(request.description, None);
    }
}
