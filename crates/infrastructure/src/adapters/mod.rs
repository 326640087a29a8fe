//! Adapter implementations of the application ports.

pub mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
