//! Error handling for abc.
//!
//! Every failure a download can end with is a variant of [`Error`]. Whether a
//! failure is retried is decided by the orchestrator according to the phase
//! it happened in; [`Error::is_transient`] only answers the question for the
//! errors that carry enough information on their own (transport errors and
//! HTTP statuses).

use crate::utils::display_size;

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen while downloading.
#[derive(Error, Debug)]
pub enum Error {
    /// No URL was supplied with the request.
    #[error("No URL provided")]
    MissingUrl,

    /// The supplied URL cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value supplied by the caller cannot be sent.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// A directory occupies the destination path.
    #[error("A directory with that name already exists: {}", .0.display())]
    DestinationIsDirectory(PathBuf),

    /// The destination is larger than the resource, so it cannot be a
    /// partial download of it.
    #[error("Destination file larger than content length ({existing} > {total} bytes)")]
    DestinationTooLarge {
        /// Size of the file found on disk.
        existing: u64,
        /// Size declared by the server.
        total: u64,
    },

    /// The server declared a different total size on a later probe: the
    /// remote resource changed while it was being downloaded.
    #[error(
        "Content length changed during download (expected {}, got {})",
        size(.expected),
        size(.actual)
    )]
    TotalSizeChanged {
        /// Size captured by the first successful probe.
        expected: Option<u64>,
        /// Size reported by the latest probe.
        actual: Option<u64>,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// Status returned by the server.
        status: StatusCode,
        /// Requested URL.
        url: String,
    },

    /// I/O Error.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

impl Error {
    /// Returns `true` for errors that may go away when the request is sent
    /// again: connection failures, timeouts, interrupted bodies and
    /// server-side HTTP statuses.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => {
                status.is_server_error()
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Error::Reqwest { source } => !source.is_builder(),
            Error::Middleware { source } => match source {
                reqwest_middleware::Error::Reqwest(e) => !e.is_builder(),
                reqwest_middleware::Error::Middleware(_) => true,
            },
            _ => false,
        }
    }
}

fn size(size: &Option<u64>) -> String {
    display_size(*size)
}

/// Result type alias for operations that can fail with an abc [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
