//! Retry classification of errors raised during an attempt.
//!
//! The same error type can be fatal in one phase and retryable in another:
//! an I/O error while preparing the destination ends the download, while an
//! I/O error while copying the body is retried.

use crate::error::Error;

/// An error tagged with what the retry loop should do about it.
#[derive(Debug)]
pub(crate) enum Failure {
    /// Retry after backing off, budget permitting.
    Transient(Error),
    /// Abort the whole download.
    Fatal(Error),
}

impl Failure {
    /// Tag an error using [`Error::is_transient`].
    pub(crate) fn classify(error: Error) -> Self {
        if error.is_transient() {
            Failure::Transient(error)
        } else {
            Failure::Fatal(error)
        }
    }
}

/// Tag the error of a result.
pub(crate) trait FailureExt<T> {
    /// The error ends the download.
    fn fatal(self) -> Result<T, Failure>;
    /// The error is retried.
    fn transient(self) -> Result<T, Failure>;
    /// The error decides for itself.
    fn classified(self) -> Result<T, Failure>;
}

impl<T, E: Into<Error>> FailureExt<T> for Result<T, E> {
    fn fatal(self) -> Result<T, Failure> {
        self.map_err(|e| Failure::Fatal(e.into()))
    }

    fn transient(self) -> Result<T, Failure> {
        self.map_err(|e| Failure::Transient(e.into()))
    }

    fn classified(self) -> Result<T, Failure> {
        self.map_err(|e| Failure::classify(e.into()))
    }
}
