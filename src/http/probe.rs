//! The metadata-only request issued before committing to a transfer.
//!
//! A probe learns two things about a resource: its declared size and whether
//! the server serves byte ranges of it. Comparing the declared size with
//! what is already on disk tells the orchestrator whether the destination is
//! complete, resumable, or cannot belong to this resource at all.

use crate::error::{Error, Result};
use crate::utils::{accept_ranges, content_length};

use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// The `Accept-Ranges` token that enables resuming.
pub const BYTES_RANGE_UNIT: &str = "bytes";

/// What a probe learned about a resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeInfo {
    /// Declared size, `None` when missing or unparseable.
    pub total_size: Option<u64>,
    /// Raw `Accept-Ranges` token, empty when the server sent none.
    pub accept_ranges: String,
}

/// Outcome of comparing a probe with the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// The destination already holds the whole resource.
    AlreadyComplete,
    /// There is still something to transfer.
    Incomplete,
}

impl ProbeInfo {
    /// Whether the server advertised byte-range support.
    pub fn supports_ranges(&self) -> bool {
        self.accept_ranges == BYTES_RANGE_UNIT
    }

    /// Compare the declared size with the size of the destination on disk.
    ///
    /// A destination strictly larger than a known total size cannot be a
    /// partial download of this resource and is reported as
    /// [`Error::DestinationTooLarge`]. An unknown or zero total size never
    /// short-circuits.
    ///
    /// ```rust
    /// use abc::http::{ProbeInfo, ProbeVerdict};
    ///
    /// let info = ProbeInfo { total_size: Some(10), accept_ranges: "bytes".into() };
    /// assert_eq!(info.check_existing(10).unwrap(), ProbeVerdict::AlreadyComplete);
    /// assert_eq!(info.check_existing(4).unwrap(), ProbeVerdict::Incomplete);
    /// assert!(info.check_existing(11).is_err());
    /// ```
    pub fn check_existing(&self, existing: u64) -> Result<ProbeVerdict> {
        match self.total_size {
            Some(total) if total > 0 && existing == total => Ok(ProbeVerdict::AlreadyComplete),
            Some(total) if total > 0 && existing > total => {
                Err(Error::DestinationTooLarge { existing, total })
            }
            _ => Ok(ProbeVerdict::Incomplete),
        }
    }
}

/// Issue a `HEAD` request against `url` and read size and range support
/// from the response headers.
pub async fn probe(client: &ClientWithMiddleware, url: &Url) -> Result<ProbeInfo> {
    let res = client.head(url.clone()).send().await?;

    let status = res.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status,
            url: url.to_string(),
        });
    }

    let headers = res.headers();
    let info = ProbeInfo {
        total_size: content_length(headers),
        accept_ranges: accept_ranges(headers),
    };
    debug!(
        "Probed {}: size={:?} accept-ranges={:?}",
        url, info.total_size, info.accept_ranges
    );

    Ok(info)
}
