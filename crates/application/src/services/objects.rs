//! Generic object operations.

use geocore_domain::{BinaryDataInfo, GeocoreResult, ObjectCore};

use super::require_sid;
use crate::request::FileUpload;
use crate::session::Geocore;

const UNSAVED_BINARY: &str = "unsaved object cannot have binary data";

/// Operations on generic Geocore objects.
pub struct ObjectService<'g> {
    pub(crate) geocore: &'g Geocore,
}

impl ObjectService<'_> {
    /// Fetches any object by its textual ID.
    pub async fn get(&self, id: &str) -> GeocoreResult<ObjectCore> {
        self.geocore.get(&format!("/objs/{id}"), None).await
    }

    /// Lists binary attachments of a persisted object.
    pub async fn binaries(&self, core: &ObjectCore) -> GeocoreResult<Vec<BinaryDataInfo>> {
        let sid = require_sid(core, UNSAVED_BINARY)?;
        self.geocore.get_list(&format!("/objs/{sid}/bins"), None).await
    }

    /// Fetches the download descriptor for one attachment.
    pub async fn binary_url(&self, core: &ObjectCore, key: &str) -> GeocoreResult<BinaryDataInfo> {
        let sid = require_sid(core, UNSAVED_BINARY)?;
        self.geocore
            .get(&format!("/objs/{sid}/bins/{key}/url"), None)
            .await
    }

    /// Uploads binary data under `key` for a persisted object.
    pub async fn upload(
        &self,
        core: &ObjectCore,
        key: &str,
        contents: Vec<u8>,
        mime_type: &str,
    ) -> GeocoreResult<BinaryDataInfo> {
        let sid = require_sid(core, UNSAVED_BINARY)?;
        let upload = FileUpload::new(contents)
            .field_name("data")
            .file_name("data")
            .mime_type(mime_type);
        self.geocore
            .upload(&format!("/objs/{sid}/bins/{key}"), None, upload)
            .await
    }
}
