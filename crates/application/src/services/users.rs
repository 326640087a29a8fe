//! User operations.

use geocore_domain::{GeocoreResult, ToJson, User};

use super::save_taggable;
use crate::request::Body;
use crate::session::Geocore;

/// Operations on users.
pub struct UserService<'g> {
    pub(crate) geocore: &'g Geocore,
}

impl UserService<'_> {
    /// Registers a new user.
    ///
    /// Pending group IDs and tags ride as request parameters; the user
    /// itself is the JSON payload.
    pub async fn register(&self, user: &User) -> GeocoreResult<User> {
        self.geocore
            .post(
                "/register",
                user.register_params(),
                Some(Body::Json(user.to_json())),
            )
            .await
    }

    /// Saves the user, submitting pending tags as request parameters.
    pub async fn save(&self, user: &User) -> GeocoreResult<User> {
        save_taggable(self.geocore, "users", &user.core, &user.tagging, user).await
    }
}
