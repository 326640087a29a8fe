//! Shared fields of persisted Geocore objects.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::json::{self, FromJson, ToJson};

/// Fields common to every object managed by the Geocore service.
///
/// Concrete entities embed this struct rather than inheriting from it.
/// An object without a [`sid`](Self::sid) has never been persisted;
/// operations that require one fail locally with `InvalidParameter`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectCore {
    /// Server-assigned numeric identifier, present once persisted.
    pub sid: Option<i64>,
    /// Textual key, client- or server-assigned.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Set by the server on creation; never sent back on save.
    pub create_time: Option<DateTime<Utc>>,
    /// Set by the server on update; never sent back on save.
    pub update_time: Option<DateTime<Utc>>,
    /// Vote counter maintained by the server.
    pub upvotes: Option<i64>,
    /// Vote counter maintained by the server.
    pub downvotes: Option<i64>,
    /// Free-form key-value payload; entries with absent values are
    /// dropped on encode.
    pub custom_data: Option<HashMap<String, Option<String>>>,
    /// Opaque JSON blob; written to the wire as a raw string field.
    pub json_data: Option<Value>,
}

impl ObjectCore {
    /// Whether the object has been persisted by the server.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.sid.is_some()
    }
}

impl FromJson for ObjectCore {
    fn from_json(json: &Value) -> Self {
        let custom_data = json
            .get("customData")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.as_str().map(str::to_owned)))
                    .collect()
            });
        let json_data = json
            .get("jsonData")
            .filter(|value| !value.is_null())
            .cloned();
        Self {
            sid: json::opt_i64(json, "sid"),
            id: json::opt_string(json, "id"),
            name: json::opt_string(json, "name"),
            description: json::opt_string(json, "description"),
            create_time: json::opt_datetime(json, "createTime"),
            update_time: json::opt_datetime(json, "updateTime"),
            upvotes: json::opt_i64(json, "upvotes"),
            downvotes: json::opt_i64(json, "downvotes"),
            custom_data,
            json_data,
        }
    }
}

impl ToJson for ObjectCore {
    fn to_json(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(sid) = self.sid {
            map.insert("sid".to_owned(), sid.into());
        }
        if let Some(id) = &self.id {
            map.insert("id".to_owned(), id.clone().into());
        }
        if let Some(name) = &self.name {
            map.insert("name".to_owned(), name.clone().into());
        }
        if let Some(description) = &self.description {
            map.insert("description".to_owned(), description.clone().into());
        }
        if let Some(custom_data) = &self.custom_data {
            let entries: Map<String, Value> = custom_data
                .iter()
                .filter_map(|(key, value)| {
                    value.as_ref().map(|value| (key.clone(), value.clone().into()))
                })
                .collect();
            map.insert("customData".to_owned(), Value::Object(entries));
        }
        if let Some(json_data) = &self.json_data {
            map.insert("jsonData".to_owned(), json_data.to_string().into());
        }
        map
    }
}

/// A raw JSON payload returned by the service, for endpoints without a
/// dedicated entity type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericObject {
    json: Value,
}

impl GenericObject {
    /// The raw payload.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.json
    }
}

impl FromJson for GenericObject {
    fn from_json(json: &Value) -> Self {
        Self { json: json.clone() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_reads_server_side_fields() {
        let core = ObjectCore::from_json(&json!({
            "sid": 123,
            "id": "PLA-TEST-1",
            "name": "Test 1",
            "description": "First test place",
            "createTime": "2015/04/14 09:30:00",
            "updateTime": "2015/04/15 10:00:00",
            "upvotes": 7,
            "downvotes": 2,
        }));
        assert_eq!(core.sid, Some(123));
        assert_eq!(core.id.as_deref(), Some("PLA-TEST-1"));
        assert_eq!(core.upvotes, Some(7));
        assert!(core.is_persisted());
        assert!(core.create_time.is_some());
    }

    #[test]
    fn test_encode_emits_only_present_fields() {
        let core = ObjectCore {
            id: Some("PLA-TEST-1".to_owned()),
            name: Some("Test 1".to_owned()),
            ..ObjectCore::default()
        };
        let map = core.to_json();
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("sid"));
        assert!(!map.contains_key("description"));
    }

    #[test]
    fn test_encode_never_emits_server_side_fields() {
        let core = ObjectCore::from_json(&json!({
            "sid": 1,
            "createTime": "2015/04/14 09:30:00",
            "upvotes": 7,
        }));
        let map = core.to_json();
        assert!(!map.contains_key("createTime"));
        assert!(!map.contains_key("updateTime"));
        assert!(!map.contains_key("upvotes"));
        assert!(!map.contains_key("downvotes"));
    }

    #[test]
    fn test_custom_data_drops_absent_values() {
        let mut custom_data = HashMap::new();
        custom_data.insert("floor".to_owned(), Some("2".to_owned()));
        custom_data.insert("closed".to_owned(), None);
        let core = ObjectCore {
            custom_data: Some(custom_data),
            ..ObjectCore::default()
        };
        let map = core.to_json();
        let entries = map["customData"].as_object().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["floor"], json!("2"));
    }

    #[test]
    fn test_json_data_written_as_raw_string() {
        let core = ObjectCore {
            json_data: Some(json!({"a": 1})),
            ..ObjectCore::default()
        };
        let map = core.to_json();
        assert_eq!(map["jsonData"], json!(r#"{"a":1}"#));
    }

    #[test]
    fn test_null_json_data_decodes_as_absent() {
        let core = ObjectCore::from_json(&json!({"jsonData": null}));
        assert_eq!(core.json_data, None);
    }

    #[test]
    fn test_round_trip_reproduces_emitted_fields() {
        let core = ObjectCore {
            sid: Some(42),
            id: Some("OBJ-1".to_owned()),
            name: Some("An object".to_owned()),
            description: Some("Described".to_owned()),
            ..ObjectCore::default()
        };
        let decoded = ObjectCore::from_json(&Value::Object(core.to_json()));
        assert_eq!(decoded, core);
    }
}
