//! Geocore Infrastructure - adapters for the Geocore client
//!
//! Provides the production [`HttpTransport`](geocore_application::HttpTransport)
//! implementation backed by `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use geocore_application::Geocore;
//! use geocore_infrastructure::ReqwestTransport;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let geocore = Geocore::new(transport, "https://demo.geocore.jp/api", "PRO-DEMO-1")?
//!     .with_device_identifier("IOS_SIMULATOR");
//!
//! geocore.login_with_default_user().await?;
//! let places = geocore.places().nearest(35.658581, 139.745433).await?;
//! for place in places {
//!     println!("{:?}", place.core.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;

pub use adapters::ReqwestTransport;
