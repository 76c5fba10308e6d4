//! Shared utility functions.
//!
//! Header parsing helpers used by the probe and the transfer, and the size
//! rendering shared by the progress line and error messages.
//!
//! # Examples
//!
//! ```rust
//! use abc::utils::{display_size, parse_content_length};
//!
//! assert_eq!(parse_content_length("1024"), Some(1024));
//! assert_eq!(display_size(None), "?");
//! ```

pub mod content_length;

pub use content_length::{
    accept_ranges, content_length, display_size, parse_content_length, UNKNOWN_SIZE,
};
