//! Geocore Domain - object model for the Geocore API
//!
//! This crate defines the entities exchanged with the Geocore
//! geolocation/object-management service. All types here are pure Rust
//! with no I/O dependencies; wire mapping is expressed through the
//! [`FromJson`] and [`ToJson`] traits over `serde_json` values.

pub mod binary;
pub mod error;
pub mod json;
pub mod object;
pub mod place;
pub mod point;
pub mod tag;
pub mod time;
pub mod user;

pub use binary::BinaryDataInfo;
pub use error::{ERROR_DOMAIN, GeocoreError, GeocoreResult};
pub use json::{FromJson, ToJson};
pub use object::{GenericObject, ObjectCore};
pub use place::Place;
pub use point::Point;
pub use tag::{Tag, TagKind, Tagging};
pub use user::User;
