//! Geographical point in WGS84.

use serde_json::{Map, Value};

use crate::json::{self, FromJson, ToJson};

/// Geographical point in WGS84.
///
/// Either coordinate may be absent. A point serializes to a two-key JSON
/// object only when both coordinates are present; otherwise it
/// serializes to an empty object, never a partial one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Latitude in degrees.
    pub latitude: Option<f32>,
    /// Longitude in degrees.
    pub longitude: Option<f32>,
}

impl Point {
    /// Creates a point with both coordinates set.
    #[must_use]
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

impl FromJson for Point {
    fn from_json(json: &Value) -> Self {
        Self {
            latitude: json::opt_f32(json, "latitude"),
            longitude: json::opt_f32(json, "longitude"),
        }
    }
}

impl ToJson for Point {
    fn to_json(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            map.insert("latitude".to_owned(), latitude.into());
            map.insert("longitude".to_owned(), longitude.into());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_round_trip_preserves_coordinates_exactly() {
        let point = Point::new(35.65858, 139.745433);
        let decoded = Point::from_json(&Value::Object(point.to_json()));
        assert_eq!(decoded.latitude, Some(35.65858));
        assert_eq!(decoded.longitude, Some(139.745433));
    }

    #[test]
    fn test_partial_point_serializes_to_empty_object() {
        let no_longitude = Point {
            latitude: Some(35.0),
            longitude: None,
        };
        assert!(no_longitude.to_json().is_empty());
        assert!(Point::default().to_json().is_empty());
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        let point = Point::from_json(&json!({"latitude": 35.0}));
        assert_eq!(point.latitude, Some(35.0));
        assert_eq!(point.longitude, None);
    }
}
