//! Geocore places.

use serde_json::{Map, Value};

use crate::json::{self, FromJson, ToJson};
use crate::object::ObjectCore;
use crate::point::Point;
use crate::tag::Tagging;

/// A place managed by the Geocore service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    /// Shared object fields.
    pub core: ObjectCore,
    /// Tagging state.
    pub tagging: Tagging,
    /// Abbreviated name.
    pub short_name: Option<String>,
    /// Abbreviated description.
    pub short_description: Option<String>,
    /// Location of the place.
    pub point: Option<Point>,
    /// Distance limit in meters used by proximity features.
    pub distance_limit: Option<f32>,
}

impl FromJson for Place {
    fn from_json(json: &Value) -> Self {
        Self {
            core: ObjectCore::from_json(json),
            tagging: Tagging::from_json(json),
            short_name: json::opt_string(json, "shortName"),
            short_description: json::opt_string(json, "shortDescription"),
            point: json.get("point").map(Point::from_json),
            distance_limit: json::opt_f32(json, "distanceLimit"),
        }
    }
}

impl ToJson for Place {
    fn to_json(&self) -> Map<String, Value> {
        let mut map = self.core.to_json();
        if let Some(short_name) = &self.short_name {
            map.insert("shortName".to_owned(), short_name.clone().into());
        }
        if let Some(short_description) = &self.short_description {
            map.insert("shortDescription".to_owned(), short_description.clone().into());
        }
        if let Some(point) = &self.point {
            map.insert("point".to_owned(), Value::Object(point.to_json()));
        }
        if let Some(distance_limit) = self.distance_limit {
            map.insert("distanceLimit".to_owned(), distance_limit.into());
        }
        map
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_reads_place_fields() {
        let place = Place::from_json(&json!({
            "sid": 101,
            "id": "PLA-TEST-1",
            "name": "Shiba Park",
            "shortName": "T1",
            "point": {"latitude": 35.65858, "longitude": 139.745433},
            "distanceLimit": 500.0,
            "tags": [{"name": "station"}],
        }));
        assert_eq!(place.core.sid, Some(101));
        assert_eq!(place.short_name.as_deref(), Some("T1"));
        assert_eq!(place.point.unwrap().latitude, Some(35.65858));
        assert_eq!(place.distance_limit, Some(500.0));
        assert_eq!(place.tagging.tags.len(), 1);
    }

    #[test]
    fn test_point_survives_round_trip_exactly() {
        let place = Place {
            point: Some(Point::new(35.65858, 139.745433)),
            ..Place::default()
        };
        let decoded = Place::from_json(&Value::Object(place.to_json()));
        let point = decoded.point.unwrap();
        assert_eq!(point.latitude, Some(35.65858));
        assert_eq!(point.longitude, Some(139.745433));
    }

    #[test]
    fn test_round_trip_reproduces_emitted_fields() {
        let place = Place {
            core: ObjectCore {
                id: Some("PLA-TEST-1".to_owned()),
                name: Some("Shiba Park".to_owned()),
                ..ObjectCore::default()
            },
            short_name: Some("T1".to_owned()),
            short_description: Some("short".to_owned()),
            point: Some(Point::new(35.0, 139.0)),
            distance_limit: Some(100.0),
            ..Place::default()
        };
        let decoded = Place::from_json(&Value::Object(place.to_json()));
        assert_eq!(decoded, place);
    }

    #[test]
    fn test_decode_tolerates_empty_object() {
        let place = Place::from_json(&json!({}));
        assert_eq!(place.core.sid, None);
        assert_eq!(place.point, None);
        assert!(place.tagging.tags.is_empty());
    }
}
