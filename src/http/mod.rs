//! HTTP module containing the client and the probe.
//!
//! - [`client`] - HTTP client creation with the standard request headers and
//!   tracing middleware
//! - [`probe`] - the metadata-only request that learns size and range support
//!
//! # Examples
//!
//! ```rust
//! use abc::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), abc::Error> {
//! let config = HttpClientConfig {
//!     user_agent: Some("abc-example/1.0".into()),
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod probe;

pub use client::{create_http_client, HttpClientConfig};
pub use probe::{probe, ProbeInfo, ProbeVerdict};
