//! Content length extraction utilities.
//!
//! The declared size of a resource comes from the `Content-Length` header of
//! the probe response. A missing or malformed header is not an error: the
//! size is simply unknown and rendered as [`UNKNOWN_SIZE`].

use reqwest::header::{HeaderMap, ACCEPT_RANGES, CONTENT_LENGTH};

/// Placeholder rendered wherever an unknown size would appear.
pub const UNKNOWN_SIZE: &str = "?";

/// Parse the value of a `Content-Length` header.
///
/// Returns `None` if the value is not a non-negative integer.
///
/// # Example
///
/// ```rust
/// use abc::utils::parse_content_length;
///
/// assert_eq!(parse_content_length(" 2048 "), Some(2048));
/// assert_eq!(parse_content_length("-1"), None);
/// ```
pub fn parse_content_length(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

/// Extract the declared content length from response headers.
pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_length)
}

/// Extract the raw `Accept-Ranges` token, or an empty string when the
/// server did not send one.
pub fn accept_ranges(headers: &HeaderMap) -> String {
    headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Render a size for humans, using [`UNKNOWN_SIZE`] when it is not known.
pub fn display_size(size: Option<u64>) -> String {
    match size {
        Some(size) => size.to_string(),
        None => UNKNOWN_SIZE.to_string(),
    }
}
