//! Ports consumed by the client core.

pub mod transport;

pub use transport::{HttpMethod, HttpResponse, HttpTransport, RequestSpec, TransportError};
