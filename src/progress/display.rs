//! Terminal display shared by every download of a [`Downloader`].
//!
//! Status bars live in one [`MultiProgress`] drawn on stdout, so concurrent
//! downloads each get their own line. Operator messages go through
//! [`ProgressDisplay::println`], which prints above the active bars instead
//! of garbling them, and falls back to plain stdout when the bars are not
//! drawn (progress disabled, or stdout is not a terminal).
//!
//! [`Downloader`]: crate::Downloader

use crate::progress::ProgressBarOpts;

use console::Term;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;
use tracing::debug;

/// Progress display manager that coordinates status bars and messages.
#[derive(Clone)]
pub struct ProgressDisplay {
    /// The multi-progress instance coordinating the status bars.
    multi: Arc<MultiProgress>,
    /// Style options for status bars.
    style: ProgressBarOpts,
}

impl ProgressDisplay {
    /// Create a new display drawing on stdout, or a hidden one when the
    /// style is disabled.
    pub fn new(style: ProgressBarOpts) -> Self {
        let target = match style.is_enabled() {
            true => ProgressDrawTarget::stdout(),
            false => ProgressDrawTarget::hidden(),
        };
        Self {
            multi: Arc::new(MultiProgress::with_draw_target(target)),
            style,
        }
    }

    /// Create a display that never draws anything.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden())
    }

    /// Create a status bar for one transfer.
    pub fn create_bar(&self) -> ProgressBar {
        self.multi.add(self.style.to_progress_bar())
    }

    /// Remove a finished status bar and leave `final_line` in its place.
    pub fn finish_bar(&self, bar: &ProgressBar, final_line: &str) {
        bar.finish_and_clear();
        self.multi.remove(bar);
        self.println(final_line);
    }

    /// Print a line above the active status bars.
    pub fn println(&self, line: &str) {
        if !self.multi.is_hidden() && self.multi.println(line).is_ok() {
            return;
        }
        if let Err(e) = Term::stdout().write_line(line) {
            debug!("Unable to write to stdout: {}", e);
        }
    }
}

impl std::fmt::Debug for ProgressDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressDisplay")
            .field("style", &self.style)
            .field("hidden", &self.multi.is_hidden())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_display_creates_hidden_bars() {
        let display = ProgressDisplay::hidden();
        let bar = display.create_bar();
        assert!(bar.is_hidden());
        display.finish_bar(&bar, "done");
        assert!(bar.is_finished());
    }
}
