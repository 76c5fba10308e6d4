//! abc downloads files over HTTP(S) and keeps at it: transfers survive
//! transient network failures by retrying with exponential backoff, and
//! partial files are resumed with byte-range requests when the server
//! supports them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use abc::{DownloadRequest, DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let request = DownloadRequest::new("https://example.com/archive.zip")
//!     .destination("output/archive.zip")
//!     .retry_limit(10);
//!
//! let downloader = DownloaderBuilder::new().build();
//! let summary = downloader.download(&request).await.into_result()?;
//! println!("{:?} bytes", summary.total_size());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - the request describing a download and the summary it yields
//! - [`downloader`] - the `Downloader`, its builder, backoff and resume logic
//! - [`error`] - centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction and the metadata probe
//! - [`progress`] - the progress reporter and status line
//! - [`utils`] - header parsing helpers

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::{DownloadOptions, DownloadRequest, Status, Summary};
pub use downloader::{Backoff, Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{create_http_client, probe, HttpClientConfig, ProbeInfo, ProbeVerdict};
pub use progress::{ProgressBarOpts, ProgressSample};
