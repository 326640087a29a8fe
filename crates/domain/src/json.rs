//! Wire mapping traits and field-access helpers.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::time;

/// Construction from a wire JSON value.
///
/// Decoding is total: absent or mistyped fields become `None`/defaults
/// rather than errors, matching the tolerant behavior of the service.
pub trait FromJson {
    /// Builds the value from wire JSON.
    fn from_json(json: &Value) -> Self;
}

/// Conversion to a wire JSON map.
///
/// Encoding emits only present fields; absent optionals never appear on
/// the wire.
pub trait ToJson {
    /// Serializes the value to a wire JSON map.
    fn to_json(&self) -> Map<String, Value>;
}

pub(crate) fn opt_string(json: &Value, key: &str) -> Option<String> {
    json.get(key).and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn opt_i64(json: &Value, key: &str) -> Option<i64> {
    json.get(key).and_then(Value::as_i64)
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn opt_f32(json: &Value, key: &str) -> Option<f32> {
    json.get(key).and_then(Value::as_f64).map(|value| value as f32)
}

pub(crate) fn opt_datetime(json: &Value, key: &str) -> Option<DateTime<Utc>> {
    json.get(key)
        .and_then(Value::as_str)
        .and_then(time::parse_datetime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_helpers_tolerate_absent_and_mistyped_fields() {
        let json = json!({"name": 42, "sid": "abc"});
        assert_eq!(opt_string(&json, "name"), None);
        assert_eq!(opt_string(&json, "missing"), None);
        assert_eq!(opt_i64(&json, "sid"), None);
        assert_eq!(opt_f32(&json, "missing"), None);
        assert_eq!(opt_datetime(&json, "name"), None);
    }

    #[test]
    fn test_helpers_extract_present_fields() {
        let json = json!({
            "name": "Aoyama Itchome",
            "sid": 42,
            "distanceLimit": 1.5,
            "createTime": "2015/04/14 09:30:00",
        });
        assert_eq!(opt_string(&json, "name"), Some("Aoyama Itchome".to_owned()));
        assert_eq!(opt_i64(&json, "sid"), Some(42));
        assert_eq!(opt_f32(&json, "distanceLimit"), Some(1.5));
        assert!(opt_datetime(&json, "createTime").is_some());
    }
}
