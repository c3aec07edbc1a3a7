//! Helpers for the `jsonb` payloads stored in every table.

use serde::Serialize;
use serde_json::Value;

use crate::errors::ModelError;

/// Serialize a typed record into a document payload.
///
/// Date and time values (`chrono::NaiveDate`, `NaiveDateTime`, `DateTime<Tz>`)
/// come out as their ISO-8601 calendar text.
pub fn to_document<T: Serialize>(value: &T) -> Result<Value, ModelError> {
    serde_json::to_value(value).map_err(|e| ModelError::Validation(format!("document serialization failed: {e}")))
}

/// Walk `path` through nested objects.
pub fn value_at<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |cur, seg| cur.get(*seg))
}

/// Integer at `path`, accepting either a JSON integer or a string holding one.
pub fn integer_at(doc: &Value, path: &[&str]) -> Option<i64> {
    match value_at(doc, path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Absent and blank keys are both "no key".
pub(crate) fn present(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    #[derive(Serialize)]
    struct Sitting {
        title: String,
        date: NaiveDate,
        opened_at: chrono::DateTime<Utc>,
        closed_at: Option<chrono::NaiveDateTime>,
    }

    #[test]
    fn dates_serialize_as_calendar_text() {
        let s = Sitting {
            title: "Plenary".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            opened_at: Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap(),
            closed_at: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap().and_hms_opt(18, 30, 0),
        };
        let doc = to_document(&s).unwrap();
        assert_eq!(doc["date"], json!("2024-03-12"));
        assert_eq!(doc["opened_at"], json!("2024-03-12T09:00:00Z"));
        assert_eq!(doc["closed_at"], json!("2024-03-12T18:30:00"));
        assert_eq!(doc["title"], json!("Plenary"));
    }

    #[test]
    fn value_at_walks_nested_objects() {
        let doc = json!({"procedure": {"reference": "2024/0001", "year": 2024}, "meta": {"source": ["EP"]}});
        assert_eq!(value_at(&doc, &["procedure", "reference"]), Some(&json!("2024/0001")));
        assert_eq!(value_at(&doc, &["meta", "source"]), Some(&json!(["EP"])));
        assert_eq!(value_at(&doc, &["procedure", "missing"]), None);
        assert_eq!(value_at(&doc, &["procedure", "reference", "deeper"]), None);
    }

    #[test]
    fn integer_at_accepts_numbers_and_numeric_strings() {
        assert_eq!(integer_at(&json!({"UserID": 42}), &["UserID"]), Some(42));
        assert_eq!(integer_at(&json!({"UserID": " 43 "}), &["UserID"]), Some(43));
        assert_eq!(integer_at(&json!({"UserID": "forty-two"}), &["UserID"]), None);
        assert_eq!(integer_at(&json!({"UserID": 4.5}), &["UserID"]), None);
        assert_eq!(integer_at(&json!({}), &["UserID"]), None);
    }

    #[test]
    fn blank_keys_are_absent() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some("EP")), Some("EP"));
    }
}
