//! Download summary functionality.
//!
//! A [`Summary`] is what a download hands back: a [`Status`] plus whatever
//! was learned about the resource along the way. Failed downloads still
//! report the size and range support of the last successful probe.
//!
//! # Examples
//!
//! ```rust,no_run
//! use abc::{DownloadRequest, DownloaderBuilder, Status};
//!
//! # async fn example() {
//! let downloader = DownloaderBuilder::new().build();
//! let summary = downloader
//!     .download(&DownloadRequest::new("https://example.com/file.zip").destination("file.zip"))
//!     .await;
//!
//! match summary.status() {
//!     Status::Success => println!("Downloaded {:?} bytes", summary.total_size()),
//!     Status::AlreadyComplete => println!("Nothing to do"),
//!     Status::Probed => println!("Accept-Ranges = {}", summary.accept_ranges()),
//!     Status::Fail(e) => println!("Download failed: {}", e),
//! }
//! # }
//! ```

use crate::error::{Error, Result};

use std::time::Duration;

/// Final state of a download.
#[derive(Debug)]
pub enum Status {
    /// The body was transferred to the destination.
    Success,
    /// The destination already held the whole resource; nothing was fetched.
    AlreadyComplete,
    /// No destination was given; only the metadata probe ran.
    Probed,
    /// The download ended with an error.
    Fail(Error),
}

/// Represents the result of a download.
#[derive(Debug)]
pub struct Summary {
    /// Requested URL as given by the caller.
    url: String,
    /// Declared total size of the resource, if known.
    total_size: Option<u64>,
    /// Raw `Accept-Ranges` token of the resource.
    accept_ranges: String,
    /// Retries consumed.
    retries: u32,
    /// Wall-clock duration of the transfer, if one started.
    elapsed: Option<Duration>,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(
        url: impl Into<String>,
        total_size: Option<u64>,
        accept_ranges: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            url: url.into(),
            total_size,
            accept_ranges: accept_ranges.into(),
            retries: 0,
            elapsed: None,
            status,
        }
    }

    /// Attach the number of retries consumed.
    pub fn with_retries(self, retries: u32) -> Self {
        Self { retries, ..self }
    }

    /// Attach the wall-clock duration of the transfer.
    pub fn with_elapsed(self, elapsed: Option<Duration>) -> Self {
        Self { elapsed, ..self }
    }

    /// Get the requested URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the declared total size, `None` when unknown.
    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    /// Get the raw `Accept-Ranges` token, empty when unsupported.
    pub fn accept_ranges(&self) -> &str {
        &self.accept_ranges
    }

    /// Get the number of retries consumed.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Get the wall-clock duration of the transfer.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Get the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the error, if the download failed.
    pub fn error(&self) -> Option<&Error> {
        match self.status {
            Status::Fail(ref e) => Some(e),
            _ => None,
        }
    }

    /// Whether the download ended without error.
    pub fn is_success(&self) -> bool {
        !matches!(self.status, Status::Fail(_))
    }

    /// Turn a failed summary into its error.
    pub fn into_result(self) -> Result<Summary> {
        match self.status {
            Status::Fail(e) => Err(e),
            _ => Ok(self),
        }
    }
}
