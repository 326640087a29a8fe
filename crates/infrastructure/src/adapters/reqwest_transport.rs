//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port from the
//! application crate. The request is already fully formed when it
//! arrives here; the adapter only executes it and collects the raw
//! response.

use async_trait::async_trait;
use reqwest::{Client, Method};

use geocore_application::{HttpMethod, HttpResponse, HttpTransport, RequestSpec, TransportError};

/// HTTP transport backed by a shared `reqwest` client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("geocore/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| TransportError(error.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client, keeping its configuration.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the port's `HttpMethod` to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RequestSpec) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|error| TransportError(format!("failed to read body: {error}")))?
            .to_vec();
        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}
