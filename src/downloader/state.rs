//! Mutable state of one download.
//!
//! A [`TransferState`] is created by every call to
//! [`Downloader::download`](crate::Downloader::download), threaded through
//! each attempt, and dropped when the call returns. Nothing is shared
//! between calls, so independent downloads can run concurrently. File and
//! response handles are scoped to a single attempt and closed when it ends.

use super::backoff::Backoff;
use crate::error::{Error, Result};
use crate::http::ProbeInfo;

use std::time::{Duration, Instant};
use tracing::debug;

/// State carried across the attempts of one download.
#[derive(Debug)]
pub struct TransferState {
    /// Size of the destination when the current attempt started.
    pub existing_size: u64,
    /// Whether a destination file was found for the current attempt.
    pub file_exists: bool,
    /// First successful probe, with the range support of the latest one.
    reference: Option<ProbeInfo>,
    /// Retries consumed so far, across every phase.
    retries: u32,
    /// Delay before the next retry.
    delay: Duration,
    backoff: Backoff,
    /// When the first attempt started preparing the destination.
    started: Option<Instant>,
}

impl TransferState {
    /// Fresh state for a new download.
    pub fn new(backoff: Backoff) -> Self {
        Self {
            existing_size: 0,
            file_exists: false,
            reference: None,
            retries: 0,
            delay: backoff.initial(),
            backoff,
            started: None,
        }
    }

    /// Record a probe. The first one fixes the reference total size; any
    /// later probe declaring another size means the resource changed.
    pub fn record_probe(&mut self, info: ProbeInfo) -> Result<&ProbeInfo> {
        if let Some(ref reference) = self.reference {
            if reference.total_size != info.total_size {
                return Err(Error::TotalSizeChanged {
                    expected: reference.total_size,
                    actual: info.total_size,
                });
            }
        }
        Ok(self.reference.insert(info))
    }

    /// Reference probe, if one succeeded.
    pub fn reference(&self) -> Option<&ProbeInfo> {
        self.reference.as_ref()
    }

    /// Consume one retry, unless `limit` retries were already consumed.
    pub fn try_consume_retry(&mut self, limit: Option<u32>) -> bool {
        if limit.is_some_and(|limit| self.retries >= limit) {
            return false;
        }
        self.retries += 1;
        true
    }

    /// Retries consumed so far.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Sleep for the current delay and grow it for the next retry.
    ///
    /// The wait is not interrupted by anything but dropping the download
    /// future.
    pub async fn back_off(&mut self) {
        debug!("Backing off for {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
        self.delay = self.backoff.next(self.delay);
    }

    /// Delay the next [`back_off`](Self::back_off) will wait.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record the start of the operation, once.
    pub fn mark_started(&mut self) {
        self.started.get_or_insert_with(Instant::now);
    }

    /// Time since the operation started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started.map(|s| s.elapsed())
    }
}
