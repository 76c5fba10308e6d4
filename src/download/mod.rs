//! Download module containing the input and output of a download.
//!
//! - [`request`] - [`DownloadRequest`] and its [`DownloadOptions`]
//! - [`summary`] - [`Summary`] and [`Status`], the result of a download

pub mod request;
pub mod summary;

pub use request::{DownloadOptions, DownloadRequest};
pub use summary::{Status, Summary};
