//! Progress line styling and rendering.
//!
//! The status line is rendered by [`render_line`] and handed to an
//! [`indicatif::ProgressBar`] as its message, so the bar template only decides
//! what surrounds it.
//!
//! ```rust
//! use abc::progress::{render_line, ProgressSample};
//!
//! let sample = ProgressSample { current: 512, previous: 256 };
//! assert_eq!(
//!     render_line(&sample, Some(1024)),
//!     "50% | 512 bytes of 1024 | 256 bytes per second"
//! );
//! assert_eq!(
//!     render_line(&sample, None),
//!     "--% | 512 bytes of ? | 256 bytes per second"
//! );
//! ```

use crate::progress::reporter::ProgressSample;
use crate::utils::display_size;

use indicatif::{ProgressBar, ProgressStyle};

/// Placeholder rendered instead of a percentage when the size is unknown.
pub const UNKNOWN_PERCENT: &str = "--";

/// Render the status line for a sample.
pub fn render_line(sample: &ProgressSample, total: Option<u64>) -> String {
    let percent = match sample.percent(total) {
        Some(p) => p.to_string(),
        None => UNKNOWN_PERCENT.to_string(),
    };
    format!(
        "{}% | {} bytes of {} | {} bytes per second",
        percent,
        sample.current,
        display_size(total),
        sample.rate()
    )
}

/// Define the options for the status bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Enable or disable the status bar.
    pub(crate) enabled: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_STATUS_LINE.into()),
            enabled: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template showing only the rendered status line.
    ///
    /// `50% | 512 bytes of 1024 | 256 bytes per second`
    pub const TEMPLATE_STATUS_LINE: &'static str = "{msg}";
    /// Template prefixing the status line with a spinner and elapsed time.
    ///
    /// `⠁ [00:00:03] 50% | 512 bytes of 1024 | 256 bytes per second`
    pub const TEMPLATE_SPINNER: &'static str = "{spinner:.green} [{elapsed_precise}] {msg}";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(template: Option<String>, enabled: bool) -> Self {
        Self { template, enabled }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the bare status line.
    pub fn to_progress_style(&self) -> ProgressStyle {
        self.template
            .as_deref()
            .and_then(|t| ProgressStyle::with_template(t).ok())
            .unwrap_or_else(|| {
                ProgressStyle::with_template(Self::TEMPLATE_STATUS_LINE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
            })
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(&self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        ProgressBar::no_length().with_style(self.to_progress_style())
    }

    /// Create a new [`ProgressBarOpts`] which hides the status bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }

    /// Whether the status bar is drawn at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line_known_size() {
        let sample = ProgressSample {
            current: 300,
            previous: 100,
        };
        assert_eq!(
            render_line(&sample, Some(1000)),
            "30% | 300 bytes of 1000 | 200 bytes per second"
        );
    }

    #[test]
    fn test_render_line_rounds_percentage() {
        let sample = ProgressSample {
            current: 2,
            previous: 2,
        };
        assert_eq!(
            render_line(&sample, Some(3)),
            "67% | 2 bytes of 3 | 0 bytes per second"
        );
    }

    #[test]
    fn test_render_line_unknown_size() {
        let sample = ProgressSample {
            current: 10,
            previous: 0,
        };
        assert_eq!(
            render_line(&sample, None),
            "--% | 10 bytes of ? | 10 bytes per second"
        );
        assert_eq!(
            render_line(&sample, Some(0)),
            "--% | 10 bytes of 0 | 10 bytes per second"
        );
    }

    #[test]
    fn test_hidden_opts() {
        let opts = ProgressBarOpts::hidden();
        assert!(!opts.is_enabled());
        assert!(opts.to_progress_bar().is_hidden());
    }

    #[test]
    fn test_invalid_template_falls_back() {
        let opts = ProgressBarOpts::new(Some("{msg".into()), true);
        let _style = opts.to_progress_style();
    }
}
