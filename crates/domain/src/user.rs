//! Geocore users.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::json::{self, FromJson, ToJson};
use crate::object::ObjectCore;
use crate::point::Point;
use crate::tag::Tagging;

/// A registered (or registrable) user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    /// Shared object fields.
    pub core: ObjectCore,
    /// Tagging state.
    pub tagging: Tagging,
    /// Password, submitted on registration and save; never returned by
    /// the service.
    pub password: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Last location reported for this user.
    pub last_location: Option<Point>,
    /// When the last location was reported.
    pub last_location_time: Option<DateTime<Utc>>,
    group_ids: Vec<String>,
}

impl User {
    /// Queues group memberships to submit with registration.
    pub fn add_group_ids<S: Into<String>>(&mut self, ids: impl IntoIterator<Item = S>) {
        self.group_ids.extend(ids.into_iter().map(Into::into));
    }

    /// Group IDs queued for registration.
    #[must_use]
    pub fn pending_group_ids(&self) -> &[String] {
        &self.group_ids
    }

    /// Registration-time request parameters: pending groups and tags,
    /// or `None` when there are none.
    #[must_use]
    pub fn register_params(&self) -> Option<Map<String, Value>> {
        let mut params = self.tagging.to_params().unwrap_or_default();
        if !self.group_ids.is_empty() {
            params.insert("group_ids".to_owned(), self.group_ids.join(",").into());
        }
        if params.is_empty() { None } else { Some(params) }
    }
}

impl FromJson for User {
    fn from_json(json: &Value) -> Self {
        Self {
            core: ObjectCore::from_json(json),
            tagging: Tagging::from_json(json),
            password: None,
            email: json::opt_string(json, "email"),
            last_location: json.get("lastLocation").map(Point::from_json),
            last_location_time: json::opt_datetime(json, "lastLocationTime"),
            group_ids: Vec::new(),
        }
    }
}

impl ToJson for User {
    fn to_json(&self) -> Map<String, Value> {
        let mut map = self.core.to_json();
        if let Some(password) = &self.password {
            map.insert("password".to_owned(), password.clone().into());
        }
        if let Some(email) = &self.email {
            map.insert("email".to_owned(), email.clone().into());
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
    fn test_decode_reads_user_fields() {
        let user = User::from_json(&json!({
            "sid": 9,
            "id": "USE-TEST-1",
            "email": "test@geocore.jp",
            "lastLocation": {"latitude": 35.6, "longitude": 139.7},
            "lastLocationTime": "2015/07/31 12:00:00",
            "tags": [{"id": "TAG-1", "type": "USER_TAG"}],
        }));
        assert_eq!(user.core.sid, Some(9));
        assert_eq!(user.email.as_deref(), Some("test@geocore.jp"));
        assert_eq!(user.last_location.unwrap().latitude, Some(35.6));
        assert!(user.last_location_time.is_some());
        assert_eq!(user.tagging.tags.len(), 1);
        assert_eq!(user.password, None);
    }

    #[test]
    fn test_encode_emits_credentials_over_core_fields() {
        let user = User {
            core: ObjectCore {
                id: Some("USE-TEST-1".to_owned()),
                name: Some("tester".to_owned()),
                ..ObjectCore::default()
            },
            password: Some("secret".to_owned()),
            email: Some("test@geocore.jp".to_owned()),
            ..User::default()
        };
        let map = user.to_json();
        assert_eq!(map["id"], json!("USE-TEST-1"));
        assert_eq!(map["password"], json!("secret"));
        assert_eq!(map["email"], json!("test@geocore.jp"));
    }

    #[test]
    fn test_register_params_merge_groups_and_tags() {
        let mut user = User::default();
        user.add_group_ids(["GRO-1", "GRO-2"]);
        user.tagging.tag(["TAG-1", "newcomer"]);
        let params = user.register_params().unwrap();
        assert_eq!(params["group_ids"], json!("GRO-1,GRO-2"));
        assert_eq!(params["tag_ids"], json!("TAG-1"));
        assert_eq!(params["tag_names"], json!("newcomer"));
    }

    #[test]
    fn test_register_params_absent_when_nothing_pending() {
        assert_eq!(User::default().register_params(), None);
    }
}
