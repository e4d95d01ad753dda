//! Error taxonomy shared by every store backend.

use std::error::Error;

use thiserror::Error;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure classification returned by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matches the requested identifier.
    #[error("record not found")]
    RecordNotFound,
    /// The record was concurrently modified, or vanished, between the
    /// caller's read and its write. The two cases are deliberately not
    /// distinguished; callers re-read and retry.
    #[error("edit conflict")]
    EditConflict,
    /// The backend failed in a way the caller cannot act on.
    #[error("store failure: {message}")]
    Failure {
        /// Human-readable operation context.
        message: String,
        /// Underlying backend error, when one exists.
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
    /// The operation exceeded its time budget.
    #[error("store operation `{operation}` timed out")]
    Timeout {
        /// Name of the operation that ran out of time.
        operation: &'static str,
    },
}

impl StoreError {
    /// Construct an opaque failure from any backend error.
    pub fn failure(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        StoreError::Failure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Construct a timeout for the named operation.
    pub fn timeout(operation: &'static str) -> Self {
        StoreError::Timeout { operation }
    }
}
