//! Progress module containing the progress reporter.
//!
//! - `reporter` - the background task sampling the destination size
//! - `style` - status line rendering and bar styling
//! - `display` - the terminal display shared by concurrent downloads
//!
//! # Examples
//!
//! ```rust
//! use abc::downloader::DownloaderBuilder;
//! use abc::progress::ProgressBarOpts;
//!
//! let downloader = DownloaderBuilder::new()
//!     .style(ProgressBarOpts::new(
//!         Some(ProgressBarOpts::TEMPLATE_SPINNER.to_string()),
//!         true,
//!     ))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod reporter;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use reporter::{
    ProgressReporter, ProgressSample, DEFAULT_SAMPLE_INTERVAL, MIN_SAMPLE_INTERVAL,
};
pub use style::{render_line, ProgressBarOpts, UNKNOWN_PERCENT};
