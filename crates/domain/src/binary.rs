//! Binary attachment metadata.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::json::{self, FromJson};

/// Information about binary data attached to an object.
///
/// The service returns either a bare key string or a full descriptor
/// with a nested `metadata` object; both decode into this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryDataInfo {
    /// Attachment key.
    pub key: Option<String>,
    /// Download URL, when resolved.
    pub url: Option<String>,
    /// Size in bytes.
    pub content_length: Option<i64>,
    /// MIME type of the stored data.
    pub content_type: Option<String>,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
}

impl FromJson for BinaryDataInfo {
    fn from_json(json: &Value) -> Self {
        if let Some(key) = json.as_str() {
            return Self {
                key: Some(key.to_owned()),
                ..Self::default()
            };
        }
        let metadata = json.get("metadata").cloned().unwrap_or(Value::Null);
        Self {
            key: json::opt_string(json, "key"),
            url: json::opt_string(json, "url"),
            content_length: json::opt_i64(&metadata, "contentLength"),
            content_type: json::opt_string(&metadata, "contentType"),
            last_modified: json::opt_datetime(&metadata, "lastModified"),
        }
    }
}
