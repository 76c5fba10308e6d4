//! The immutable input of a download.
//!
//! A [`DownloadRequest`] names the resource, where it goes, and how hard to
//! try. Leaving the destination unset turns the request into a metadata-only
//! probe that never touches the disk.
//!
//! # Examples
//!
//! ```rust
//! use abc::download::{DownloadOptions, DownloadRequest};
//! use std::time::Duration;
//!
//! let request = DownloadRequest::new("https://example.com/file.zip")
//!     .destination("downloads/file.zip")
//!     .user_agent("abc/0.3")
//!     .timeout(Duration::from_secs(30))
//!     .retry_limit(5)
//!     .options(DownloadOptions {
//!         suppress_progress: true,
//!         ..DownloadOptions::default()
//!     });
//!
//! assert!(!request.is_metadata_only());
//! ```

use crate::error::{Error, Result};

use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Switches that alter how a download behaves and what it prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Do not echo status lines and errors to the operator.
    pub suppress_debug: bool,
    /// Do not run the progress reporter.
    pub suppress_progress: bool,
    /// Delete any existing destination before the first attempt instead of
    /// resuming it.
    pub discard_existing: bool,
}

/// Represents a resource to download.
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    url: Option<String>,
    destination: Option<PathBuf>,
    range: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    retry_limit: Option<u32>,
    options: DownloadOptions,
}

impl DownloadRequest {
    /// Creates a request for `url`, with no destination and default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Sets the file the resource is written to.
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Sets an explicit byte range, without the `bytes=` prefix
    /// (e.g. `"0-1023"` or `"512-"`).
    ///
    /// An explicit range disables automatic resuming and is only sent when
    /// the server supports ranges.
    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the timeout applied to each request/response exchange.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bounds the total number of retries. Unlimited when unset.
    pub fn retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = Some(retry_limit);
        self
    }

    /// Sets the option switches.
    pub fn options(mut self, options: DownloadOptions) -> Self {
        self.options = options;
        self
    }

    /// Raw URL, if any was given.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Destination path, if any was given.
    pub fn destination_path(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Explicit byte range, if any was given.
    pub fn explicit_range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    /// `User-Agent` header, if any was given.
    pub fn agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Per-request timeout, if any was given.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Retry ceiling, `None` for unlimited.
    pub fn retries(&self) -> Option<u32> {
        self.retry_limit
    }

    /// Option switches.
    pub fn download_options(&self) -> DownloadOptions {
        self.options
    }

    /// Whether only the metadata probe will run.
    pub fn is_metadata_only(&self) -> bool {
        self.destination.is_none()
    }

    /// Validate and parse the URL.
    pub fn parsed_url(&self) -> Result<Url> {
        let raw = self.url.as_deref().ok_or(Error::MissingUrl)?;
        Url::parse(raw).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", raw, e))
        })
    }
}
