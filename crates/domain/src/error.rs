//! Error taxonomy for Geocore operations.

use thiserror::Error;

/// Error domain identifying failures raised by this SDK.
pub const ERROR_DOMAIN: &str = "jp.geocore.error";

/// Failures surfaced by Geocore operations.
///
/// Local precondition failures (`InvalidParameter`) are raised before any
/// network call; everything else classifies the outcome of a dispatched
/// request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeocoreError {
    /// Unexpected internal state. Possibly a bug.
    #[error("unexpected internal state: {message}")]
    InvalidState {
        /// What was violated.
        message: String,
    },

    /// Unexpected server response: transport failure, non-envelope body,
    /// or an HTTP status outside the known contract.
    #[error("unexpected server response")]
    InvalidServerResponse {
        /// HTTP status code, when a response was received at all.
        status_code: Option<u16>,
        /// Transport or parse detail, when available.
        message: Option<String>,
    },

    /// The server reported an application-level error.
    #[error("server error {code}: {message}")]
    ServerError {
        /// Application-defined error code, e.g. `Auth.0001`.
        code: String,
        /// Human-readable message from the server.
        message: String,
    },

    /// No session token is available; the user is not logged in.
    #[error("access token is not available")]
    TokenUndefined,

    /// Access to the resource is forbidden.
    #[error("access to the resource is forbidden")]
    UnauthorizedAccess,

    /// A parameter passed to the API is invalid.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// What was wrong with the parameter.
        message: String,
    },
}

impl GeocoreError {
    /// Builds an `InvalidParameter` error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// The application-level error code, for `ServerError` failures.
    ///
    /// Callers branch on this to decide on compensating action, e.g.
    /// registering a missing default user on `Auth.0001`.
    #[must_use]
    pub fn server_code(&self) -> Option<&str> {
        match self {
            Self::ServerError { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type alias for Geocore operations.
pub type GeocoreResult<T> = Result<T, GeocoreError>;
