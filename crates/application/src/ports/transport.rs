//! Transport port
//!
//! The seam between the client core and the HTTP stack. The core hands a
//! fully formed [`RequestSpec`] to an implementation and gets back the
//! raw status and body; everything else (envelope interpretation, error
//! classification) happens on this side of the seam.

use std::fmt;

use async_trait::async_trait;

/// HTTP methods used by the Geocore API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }

    /// Whether parameters for this method default to the URL query
    /// string rather than a JSON body.
    #[must_use]
    pub const fn queries_by_default(self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully formed outbound request.
///
/// Everything the transport needs is already resolved: absolute URL with
/// query string, headers including auth and content type, raw body
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL, query string included.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes, when the request carries a payload.
    pub body: Option<Vec<u8>>,
}

impl RequestSpec {
    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw transport-level response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

/// Transport-level failure: no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Executes prebuilt requests on an asynchronous HTTP stack.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes the request, returning the raw status and body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response could be
    /// obtained (connection failure, timeout, invalid URL).
    async fn execute(&self, request: RequestSpec) -> Result<HttpResponse, TransportError>;
}
