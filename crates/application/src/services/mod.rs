//! Entity-scoped operations.
//!
//! Each service borrows the client and groups the operations of one
//! entity family. Operations that require a persisted object resolve
//! the server ID locally first; a missing ID fails with
//! `InvalidParameter` and performs no network call.

mod objects;
mod places;
mod users;

pub use objects::ObjectService;
pub use places::PlaceService;
pub use users::UserService;

use geocore_domain::{FromJson, GeocoreError, GeocoreResult, ObjectCore, Tagging, ToJson};

use crate::request::Body;
use crate::session::Geocore;

pub(crate) fn require_sid(core: &ObjectCore, message: &str) -> GeocoreResult<i64> {
    core.sid.ok_or_else(|| GeocoreError::invalid_parameter(message))
}

/// Save path rule: persisted objects save to `/{service}/{sid}`, fresh
/// objects to `/{service}`.
pub(crate) fn save_path(service: &str, sid: Option<i64>) -> String {
    match sid {
        Some(sid) => format!("/{service}/{sid}"),
        None => format!("/{service}"),
    }
}

/// Saves a taggable entity: pending tags ride as request parameters
/// (forcing the entity JSON into the body), otherwise the entity JSON
/// itself is submitted as the POST parameters.
pub(crate) async fn save_taggable<T: FromJson, E: ToJson>(
    geocore: &Geocore,
    service: &str,
    core: &ObjectCore,
    tagging: &Tagging,
    entity: &E,
) -> GeocoreResult<T> {
    let path = save_path(service, core.sid);
    match tagging.to_params() {
        Some(params) => {
            geocore
                .post(&path, Some(params), Some(Body::Json(entity.to_json())))
                .await
        }
        None => geocore.post(&path, Some(entity.to_json()), None).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_path_appends_sid_when_persisted() {
        assert_eq!(save_path("places", Some(42)), "/places/42");
        assert_eq!(save_path("places", None), "/places");
    }

    #[test]
    fn test_require_sid() {
        let mut core = ObjectCore::default();
        assert!(matches!(
            require_sid(&core, "unsaved"),
            Err(GeocoreError::InvalidParameter { .. })
        ));
        core.sid = Some(7);
        assert_eq!(require_sid(&core, "unsaved"), Ok(7));
    }
}
