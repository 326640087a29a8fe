//! Tags and the tagging state carried by taggable entities.

use serde_json::{Map, Value};

use crate::json::{self, FromJson, ToJson};
use crate::object::ObjectCore;

/// Prefix marking a tag token as an ID rather than a name.
const TAG_ID_PREFIX: &str = "TAG";

/// Tag classification as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Tag defined by the project.
    SystemTag,
    /// Tag created by a user.
    UserTag,
}

impl TagKind {
    /// The wire representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemTag => "SYSTEM_TAG",
            Self::UserTag => "USER_TAG",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        match text {
            "SYSTEM_TAG" => Some(Self::SystemTag),
            "USER_TAG" => Some(Self::UserTag),
            _ => None,
        }
    }
}

/// A free-form tag attached to taggable entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    /// Shared object fields.
    pub core: ObjectCore,
    /// Tag classification, when reported.
    pub kind: Option<TagKind>,
}

impl FromJson for Tag {
    fn from_json(json: &Value) -> Self {
        Self {
            core: ObjectCore::from_json(json),
            kind: json
                .get("type")
                .and_then(Value::as_str)
                .and_then(TagKind::parse),
        }
    }
}

impl ToJson for Tag {
    fn to_json(&self) -> Map<String, Value> {
        let mut map = self.core.to_json();
        if let Some(kind) = self.kind {
            map.insert("type".to_owned(), kind.as_str().into());
        }
        map
    }
}

/// Tagging state carried by taggable entities.
///
/// [`tags`](Self::tags) holds tags as fetched from the service. The
/// pending lists accumulate tokens passed to [`tag`](Self::tag) before a
/// save; construction from JSON replaces fetched tags and clears pending
/// state, never merging the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tagging {
    /// Tags as fetched from the service.
    pub tags: Vec<Tag>,
    tag_ids: Vec<String>,
    tag_names: Vec<String>,
}

impl Tagging {
    /// Queues tag tokens for the next save.
    ///
    /// Tokens prefixed `TAG` are treated as tag IDs, anything else as a
    /// tag name.
    pub fn tag<S: Into<String>>(&mut self, ids_or_names: impl IntoIterator<Item = S>) {
        for token in ids_or_names {
            let token = token.into();
            if token.starts_with(TAG_ID_PREFIX) {
                self.tag_ids.push(token);
            } else {
                self.tag_names.push(token);
            }
        }
    }

    /// Pending tag IDs queued for the next save.
    #[must_use]
    pub fn pending_ids(&self) -> &[String] {
        &self.tag_ids
    }

    /// Pending tag names queued for the next save.
    #[must_use]
    pub fn pending_names(&self) -> &[String] {
        &self.tag_names
    }

    /// Pending tag state as request parameters, comma-joined, or `None`
    /// when nothing is queued.
    #[must_use]
    pub fn to_params(&self) -> Option<Map<String, Value>> {
        if self.tag_ids.is_empty() && self.tag_names.is_empty() {
            return None;
        }
        let mut params = Map::new();
        if !self.tag_ids.is_empty() {
            params.insert("tag_ids".to_owned(), self.tag_ids.join(",").into());
        }
        if !self.tag_names.is_empty() {
            params.insert("tag_names".to_owned(), self.tag_names.join(",").into());
        }
        Some(params)
    }
}

impl FromJson for Tagging {
    fn from_json(json: &Value) -> Self {
        let tags = json
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Tag::from_json).collect())
            .unwrap_or_default();
        Self {
            tags,
            tag_ids: Vec::new(),
            tag_names: Vec::new(),
        }
    }
}
