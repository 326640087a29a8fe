//! Geocore Application - client core for the Geocore API
//!
//! This crate builds authenticated requests (including multipart
//! upload), interprets response envelopes into typed results, and
//! exposes the asynchronous operation surface over the domain model.
//! All HTTP traffic flows through the [`HttpTransport`] port; the
//! `geocore-infrastructure` crate provides the production adapter.

pub mod ports;
pub mod request;
mod response;
pub mod services;
pub mod session;

pub use ports::{HttpMethod, HttpResponse, HttpTransport, RequestSpec, TransportError};
pub use request::{ACCESS_TOKEN_HEADER, Body, FileUpload, Params};
pub use services::{ObjectService, PlaceService, UserService};
pub use session::Geocore;
