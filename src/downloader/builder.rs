//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use abc::downloader::{Backoff, DownloaderBuilder};
//! use reqwest::header::{HeaderValue, REFERER};
//! use std::time::Duration;
//!
//! let downloader = DownloaderBuilder::new()
//!     .backoff(Backoff::new(Duration::from_millis(500), Duration::from_secs(60)))
//!     .concurrent_downloads(4)
//!     .header(REFERER, HeaderValue::from_static("https://example.com/"))
//!     .build();
//! ```

use super::{backoff::Backoff, config::DownloaderConfig, downloader::Downloader};
use crate::progress::{ProgressBarOpts, MIN_SAMPLE_INTERVAL};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use abc::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().concurrent_downloads(2).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the status bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style = ProgressBarOpts::hidden();
        builder
    }

    /// Set the delays between retries.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.config.backoff = backoff;
        self
    }

    /// Set the number of concurrent downloads run by
    /// [`Downloader::download_all`]. Zero is treated as one.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads.max(1);
        self
    }

    /// Set the status bar options.
    pub fn style(mut self, style: ProgressBarOpts) -> Self {
        self.config.style = style;
        self
    }

    /// Set the delay between two progress samples. Delays shorter than
    /// [`MIN_SAMPLE_INTERVAL`] are raised to it.
    pub fn sample_interval(mut self, interval: Duration) -> Self {
        self.config.sample_interval = interval.max(MIN_SAMPLE_INTERVAL);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add http headers sent with every request.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one. A `User-Agent` set on a request takes
    /// precedence over one set here.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add one http header sent with every request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
