//! The Geocore client: configuration, authentication and generic
//! dispatch.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use geocore_domain::{FromJson, GenericObject, GeocoreError, GeocoreResult, User};

use crate::ports::{HttpMethod, HttpTransport};
use crate::request::{self, Body, FileUpload, Params};
use crate::response;
use crate::services::{ObjectService, PlaceService, UserService};

/// Identity name used when no device identifier was supplied.
const DEFAULT_DEVICE_NAME: &str = "DEFAULT";

/// Project IDs carrying this prefix embed their suffix into derived
/// default-user IDs.
const PROJECT_ID_PREFIX: &str = "PRO";

/// Server error code reported when a user does not exist.
const CODE_USER_NOT_FOUND: &str = "Auth.0001";

/// The Geocore API client.
///
/// Holds the endpoint configuration and the session token, and issues
/// every request through an injected [`HttpTransport`]. Construct one
/// per backend and share it by reference; the token is written only by
/// [`login`](Self::login) and [`logout`](Self::logout), and requests
/// issued before any login simply omit the auth header.
pub struct Geocore {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    project_id: String,
    device_identifier: Option<String>,
    token: RwLock<Option<String>>,
}

impl Geocore {
    /// Creates a client for the given endpoint and project.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `base_url` is not an absolute
    /// URL.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
    ) -> GeocoreResult<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|error| {
            GeocoreError::invalid_parameter(format!("invalid base URL {base_url:?}: {error}"))
        })?;
        Ok(Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_owned(),
            project_id: project_id.into(),
            device_identifier: None,
            token: RwLock::new(None),
        })
    }

    /// Supplies the host platform's device identifier, used to derive
    /// the default-user identity.
    #[must_use]
    pub fn with_device_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.device_identifier = Some(identifier.into());
        self
    }

    /// The configured endpoint, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The tenant/application identifier scoping all API calls.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The current session token.
    ///
    /// # Errors
    ///
    /// Returns `TokenUndefined` before a successful login.
    pub async fn access_token(&self) -> GeocoreResult<String> {
        self.token
            .read()
            .await
            .clone()
            .ok_or(GeocoreError::TokenUndefined)
    }

    /// Clears the session token.
    pub async fn logout(&self) {
        *self.token.write().await = None;
    }

    // --- generic dispatch ---

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Params>,
        body: Option<&Body>,
    ) -> GeocoreResult<Value> {
        let token = self.token.read().await.clone();
        let request =
            request::build_request(method, &self.base_url, path, params, body, token.as_deref())?;
        tracing::debug!(method = %method, url = %request.url, "dispatching request");
        response::interpret(self.transport.execute(request).await)
    }

    /// GET expecting a single result.
    pub async fn get<T: FromJson>(&self, path: &str, params: Option<Params>) -> GeocoreResult<T> {
        let result = self
            .dispatch(HttpMethod::Get, path, params.as_ref(), None)
            .await?;
        Ok(T::from_json(&result))
    }

    /// GET expecting a list. A result that is not an array decodes as an
    /// empty list rather than an error.
    pub async fn get_list<T: FromJson>(
        &self,
        path: &str,
        params: Option<Params>,
    ) -> GeocoreResult<Vec<T>> {
        let result = self
            .dispatch(HttpMethod::Get, path, params.as_ref(), None)
            .await?;
        Ok(result
            .as_array()
            .map(|items| items.iter().map(T::from_json).collect())
            .unwrap_or_default())
    }

    /// POST expecting a single result.
    pub async fn post<T: FromJson>(
        &self,
        path: &str,
        params: Option<Params>,
        body: Option<Body>,
    ) -> GeocoreResult<T> {
        let result = self
            .dispatch(HttpMethod::Post, path, params.as_ref(), body.as_ref())
            .await?;
        Ok(T::from_json(&result))
    }

    /// DELETE expecting a single result.
    pub async fn delete<T: FromJson>(
        &self,
        path: &str,
        params: Option<Params>,
    ) -> GeocoreResult<T> {
        let result = self
            .dispatch(HttpMethod::Delete, path, params.as_ref(), None)
            .await?;
        Ok(T::from_json(&result))
    }

    /// POST with a multipart file payload.
    pub async fn upload<T: FromJson>(
        &self,
        path: &str,
        params: Option<Params>,
        upload: FileUpload,
    ) -> GeocoreResult<T> {
        self.post(path, params, Some(Body::Multipart(upload))).await
    }

    // --- authentication ---

    /// Logs in and stores the session token.
    ///
    /// # Errors
    ///
    /// Propagates server failures untouched; a success envelope without
    /// a token is `InvalidState`. No retry is attempted.
    pub async fn login(&self, user_id: &str, password: &str) -> GeocoreResult<String> {
        let mut params = Params::new();
        params.insert("id".to_owned(), user_id.into());
        params.insert("password".to_owned(), password.into());
        params.insert("project_id".to_owned(), self.project_id.clone().into());
        let result: GenericObject = self.post("/auth", Some(params), None).await?;
        match result.raw().get("token").and_then(Value::as_str) {
            Some(token) => {
                *self.token.write().await = Some(token.to_owned());
                tracing::debug!(%user_id, "login succeeded");
                Ok(token.to_owned())
            }
            None => Err(GeocoreError::InvalidState {
                message: "login response carries no token".to_owned(),
            }),
        }
    }

    /// Logs in with the derived default identity, registering it first
    /// when the backend reports it does not exist (`Auth.0001`).
    ///
    /// Exactly one registration and one login retry are attempted; any
    /// other failure propagates unchanged.
    pub async fn login_with_default_user(&self) -> GeocoreResult<String> {
        let user_id = self.default_user_id();
        let password = self.default_user_password();
        match self.login(&user_id, &password).await {
            Err(error) if error.server_code() == Some(CODE_USER_NOT_FOUND) => {
                tracing::debug!(%user_id, "default user not registered yet");
                self.users().register(&self.default_user()).await?;
                self.login(&user_id, &password).await
            }
            result => result,
        }
    }

    // --- default identity ---

    /// Name of the default identity: the device identifier supplied at
    /// construction, or `DEFAULT`.
    #[must_use]
    pub fn default_user_name(&self) -> String {
        self.device_identifier
            .clone()
            .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_owned())
    }

    /// User ID of the default identity: `USE<project suffix>-<name>`
    /// when the project ID starts with `PRO`, the bare name otherwise.
    #[must_use]
    pub fn default_user_id(&self) -> String {
        let name = self.default_user_name();
        match self.project_id.strip_prefix(PROJECT_ID_PREFIX) {
            Some(suffix) => format!("USE{suffix}-{name}"),
            None => name,
        }
    }

    /// Email of the default identity.
    #[must_use]
    pub fn default_user_email(&self) -> String {
        format!("{}@geocore.jp", self.default_user_name())
    }

    /// Password of the default identity: the user ID reversed.
    ///
    /// This is a weak, compatibility-only derivation; deployed backends
    /// expect exactly this reversal, so it must not be changed or
    /// treated as a security mechanism.
    #[must_use]
    pub fn default_user_password(&self) -> String {
        self.default_user_id().chars().rev().collect()
    }

    /// The default identity as a registrable [`User`].
    #[must_use]
    pub fn default_user(&self) -> User {
        let mut user = User::default();
        user.core.id = Some(self.default_user_id());
        user.core.name = Some(self.default_user_name());
        user.email = Some(self.default_user_email());
        user.password = Some(self.default_user_password());
        user
    }

    // --- entity services ---

    /// Operations on generic objects.
    #[must_use]
    pub const fn objects(&self) -> ObjectService<'_> {
        ObjectService { geocore: self }
    }

    /// Operations on users.
    #[must_use]
    pub const fn users(&self) -> UserService<'_> {
        UserService { geocore: self }
    }

    /// Operations on places.
    #[must_use]
    pub const fn places(&self) -> PlaceService<'_> {
        PlaceService { geocore: self }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::{HttpResponse, RequestSpec, TransportError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct NullTransport;

    #[async_trait]
    impl HttpTransport for NullTransport {
        async fn execute(&self, _request: RequestSpec) -> Result<HttpResponse, TransportError> {
            Err(TransportError("unreachable".to_owned()))
        }
    }

    fn client(project_id: &str) -> Geocore {
        Geocore::new(Arc::new(NullTransport), "https://api.geocore.test/", project_id).unwrap()
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = Geocore::new(Arc::new(NullTransport), "not a url", "PRO-1");
        assert!(matches!(
            result,
            Err(GeocoreError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(client("PRO-1").base_url(), "https://api.geocore.test");
    }

    #[test]
    fn test_default_identity_for_pro_project() {
        let geocore = client("PRO-TEST-1").with_device_identifier("IOS_SIMULATOR");
        assert_eq!(geocore.default_user_name(), "IOS_SIMULATOR");
        assert_eq!(geocore.default_user_id(), "USE-TEST-1-IOS_SIMULATOR");
        assert_eq!(geocore.default_user_email(), "IOS_SIMULATOR@geocore.jp");
    }

    #[test]
    fn test_default_identity_for_other_project() {
        let geocore = client("custom-project");
        assert_eq!(geocore.default_user_id(), "DEFAULT");
    }

    #[test]
    fn test_default_password_is_reversed_id() {
        let geocore = client("PRO-1").with_device_identifier("AB");
        assert_eq!(geocore.default_user_id(), "USE-1-AB");
        assert_eq!(geocore.default_user_password(), "BA-1-ESU");
    }

    #[test]
    fn test_default_user_fields() {
        let geocore = client("PRO-1").with_device_identifier("DEV");
        let user = geocore.default_user();
        assert_eq!(user.core.id, Some(geocore.default_user_id()));
        assert_eq!(user.core.name, Some("DEV".to_owned()));
        assert_eq!(user.email, Some("DEV@geocore.jp".to_owned()));
        assert_eq!(user.password, Some(geocore.default_user_password()));
    }

    #[tokio::test]
    async fn test_access_token_undefined_before_login() {
        let geocore = client("PRO-1");
        assert_eq!(
            geocore.access_token().await.unwrap_err(),
            GeocoreError::TokenUndefined
        );
    }
}
