//! Configuration shared by every download of a [`Downloader`].
//!
//! Per-download settings (destination, range, user agent, timeout, retry
//! ceiling, option switches) live in [`DownloadRequest`]; what is configured
//! here applies to all of them.
//!
//! [`Downloader`]: super::Downloader
//! [`DownloadRequest`]: crate::download::DownloadRequest

use super::backoff::Backoff;
use crate::progress::{ProgressBarOpts, DEFAULT_SAMPLE_INTERVAL};

use reqwest::header::HeaderMap;
use std::time::Duration;

/// Default number of downloads run at once by `download_all`.
pub const DEFAULT_CONCURRENT_DOWNLOADS: usize = 32;

/// Configuration structure for the downloader
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Delays between retries.
    pub backoff: Backoff,
    /// Number of maximum concurrent downloads.
    pub concurrent_downloads: usize,
    /// Extra HTTP headers sent with every request.
    pub headers: Option<HeaderMap>,
    /// Status bar options.
    pub style: ProgressBarOpts,
    /// Delay between two progress samples.
    pub sample_interval: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            backoff: Backoff::default(),
            concurrent_downloads: DEFAULT_CONCURRENT_DOWNLOADS,
            headers: None,
            style: ProgressBarOpts::default(),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}
