//! The progress reporter task.
//!
//! While a body is being transferred, one reporter task polls the size of
//! the destination file and refreshes the status line. The writer and the
//! reporter never share a file handle: the reporter only stats the path.
//!
//! Stopping is a handshake. [`ProgressReporter::stop`] signals the task
//! through a one-shot channel, the task takes one last sample, renders it and
//! exits, and `stop` only returns once the task has finished. A reporter that
//! is dropped without being stopped ends at its next wake-up.

use crate::progress::display::ProgressDisplay;
use crate::progress::style::render_line;

use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default delay between two samples.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest delay accepted between two samples.
pub const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(10);

/// Two consecutive observations of the destination size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSample {
    /// Size at the latest sample.
    pub current: u64,
    /// Size at the sample before.
    pub previous: u64,
}

impl ProgressSample {
    /// First sample of a transfer.
    pub fn new(size: u64) -> Self {
        Self {
            current: size,
            previous: size,
        }
    }

    /// Sample following this one.
    pub fn next(self, size: u64) -> Self {
        Self {
            current: size,
            previous: self.current,
        }
    }

    /// Bytes gained since the previous sample.
    pub fn rate(&self) -> u64 {
        self.current.saturating_sub(self.previous)
    }

    /// Rounded percentage of `total`, `None` when the total is unknown or
    /// zero.
    pub fn percent(&self, total: Option<u64>) -> Option<u64> {
        match total {
            Some(total) if total > 0 => {
                Some((self.current as f64 / total as f64 * 100.0).round_ties_even() as u64)
            }
            _ => None,
        }
    }
}

/// Handle on a running reporter task.
#[derive(Debug)]
pub struct ProgressReporter {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<ProgressSample>>,
    bar: ProgressBar,
    display: ProgressDisplay,
    total: Option<u64>,
}

impl ProgressReporter {
    /// Spawn a reporter for `path` on the current runtime.
    pub fn spawn(
        display: &ProgressDisplay,
        path: impl Into<PathBuf>,
        total: Option<u64>,
        interval: Duration,
    ) -> Self {
        let path = path.into();
        let bar = display.create_bar();
        let (stop, stopped) = oneshot::channel();
        let handle = tokio::spawn(report(path, total, interval, bar.clone(), stopped));

        Self {
            stop: Some(stop),
            handle: Some(handle),
            bar,
            display: display.clone(),
            total,
        }
    }

    /// Stop the reporter and wait for it to render its final sample.
    pub async fn stop(mut self) -> ProgressSample {
        if let Some(stop) = self.stop.take() {
            // The task may already be gone; joining below covers both cases.
            let _ = stop.send(());
        }

        let sample = match self.handle.take() {
            Some(handle) => match handle.await {
                Ok(sample) => sample,
                Err(e) => {
                    debug!("Progress reporter ended abnormally: {}", e);
                    ProgressSample::default()
                }
            },
            None => ProgressSample::default(),
        };

        self.display
            .finish_bar(&self.bar, &render_line(&sample, self.total));
        sample
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Closing the channel wakes the task, which then exits.
        self.stop.take();
    }
}

async fn report(
    path: PathBuf,
    total: Option<u64>,
    interval: Duration,
    bar: ProgressBar,
    mut stopped: oneshot::Receiver<()>,
) -> ProgressSample {
    let mut sample = ProgressSample::new(file_size(&path).await);
    loop {
        bar.set_message(render_line(&sample, total));
        tokio::select! {
            _ = &mut stopped => break,
            _ = tokio::time::sleep(interval) => {}
        }
        sample = sample.next(file_size(&path).await);
    }

    sample = sample.next(file_size(&path).await);
    bar.set_message(render_line(&sample, total));
    sample
}

async fn file_size(path: &Path) -> u64 {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.len())
        .unwrap_or(0)
}
