//! Downloader module containing the transfer orchestrator, its builder and
//! configuration.
//!
//! - `downloader` - the [`Downloader`] and its retry loop
//! - `builder` - [`DownloaderBuilder`] for configuring a [`Downloader`]
//! - `config` - [`DownloaderConfig`] and its defaults
//! - `backoff` - the [`Backoff`] policy between retries
//! - `resume` - [`can_resume`], whether an existing file is appended to
//! - `state` - [`TransferState`], owned by a single download
//!
//! # Examples
//!
//! ```rust,no_run
//! use abc::downloader::DownloaderBuilder;
//! use abc::download::{DownloadOptions, DownloadRequest};
//!
//! # async fn example() {
//! let downloader = DownloaderBuilder::new().build();
//!
//! // Metadata only: no destination, nothing is written.
//! let summary = downloader
//!     .download(&DownloadRequest::new("https://example.com/file.iso"))
//!     .await;
//! println!("Content-Length = {:?}", summary.total_size());
//!
//! // Start over instead of resuming whatever is on disk.
//! let summary = downloader
//!     .download(
//!         &DownloadRequest::new("https://example.com/file.iso")
//!             .destination("file.iso")
//!             .options(DownloadOptions {
//!                 discard_existing: true,
//!                 ..DownloadOptions::default()
//!             }),
//!     )
//!     .await;
//! # }
//! ```

pub mod backoff;
pub mod builder;
pub mod config;
pub mod downloader;
mod failure;
pub mod resume;
pub mod state;

pub use backoff::Backoff;
pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DEFAULT_CONCURRENT_DOWNLOADS};
pub use downloader::Downloader;
pub use resume::can_resume;
pub use state::TransferState;
