//! ISO-8601 timestamp parsing for record input.

use chklst_types::DataFormatError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%MZ"];

/// Parses a date or date-time string.
///
/// Date-only input maps to midnight. A space may stand in for the `T`
/// separator. Offsets are accepted and dropped; the wall-clock time is kept.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let text = match trimmed.as_bytes().get(10) {
        Some(b' ') | Some(b't') => format!("{}T{}", &trimmed[..10], &trimmed[11..]),
        _ => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt);
        }
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&text, fmt) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Interprets the JSON value stored under the `timestamp` key.
pub fn timestamp_from_json(value: &Value) -> Result<Option<NaiveDateTime>, DataFormatError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => parse_timestamp(s).map(Some).ok_or_else(|| {
            DataFormatError::new("timestamp", s.as_str(), "expected an ISO-8601 date or date-time")
        }),
        other => Err(DataFormatError::new(
            "timestamp",
            other.to_string(),
            "expected an ISO-8601 string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn accepts_date_only_and_date_time_forms() {
        let cases = [
            ("2025-01-15", ymd_hms(2025, 1, 15, 0, 0, 0)),
            ("2025-01-15T10:30:00", ymd_hms(2025, 1, 15, 10, 30, 0)),
            ("2025-01-15 10:30:45", ymd_hms(2025, 1, 15, 10, 30, 45)),
            ("2025-01-15T10:30", ymd_hms(2025, 1, 15, 10, 30, 0)),
            ("2025-01-15T10:30:45.123456", ymd_hms(2025, 1, 15, 10, 30, 45)),
            ("2025-01-15T10:30:00Z", ymd_hms(2025, 1, 15, 10, 30, 0)),
            ("2025-01-15 10:30:00+02:00", ymd_hms(2025, 1, 15, 10, 30, 0)),
            ("2025-01-15T23:59:59-05:00", ymd_hms(2025, 1, 15, 23, 59, 59)),
        ];
        for (input, expected) in cases {
            let parsed = parse_timestamp(input).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string());
            assert_eq!(
                parsed,
                Some(expected.format("%Y-%m-%d %H:%M:%S").to_string()),
                "input {input}"
            );
        }
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "yesterday", "2025-13-01", "2025-01-15T25:00:00", "15/01/2025"] {
            assert_eq!(parse_timestamp(input), None, "input {input}");
        }
    }

    #[test]
    fn json_value_errors_name_the_value() {
        let err = timestamp_from_json(&json!("not-a-date")).unwrap_err();
        assert_eq!(err.field, "timestamp");
        assert_eq!(err.value, "not-a-date");

        let err = timestamp_from_json(&json!(1736899200)).unwrap_err();
        assert_eq!(err.value, "1736899200");

        assert_eq!(timestamp_from_json(&Value::Null), Ok(None));
    }
}
