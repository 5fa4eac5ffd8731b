//! # Error Types
//!
//! Defines the error type every external collaborator reports through.

use thiserror::Error;

/// Failure reported by an external collaborator (network, wallet, social,
/// payment gateway).
///
/// Workflows carry these verbatim inside their own error types. Whether a
/// failure is a rejection or the expected path (a validator lookup returning
/// `NotFound` means "not staked") is decided by the workflow, not here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The requested object does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// The collaborator understood the request and refused it.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Transport or upstream failure.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within its deadline.
    #[error("{operation} timed out after {after_secs}s")]
    Timeout {
        /// Operation name, for logs.
        operation: &'static str,
        /// Deadline that expired.
        after_secs: u64,
    },
}

impl CollaboratorError {
    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true for `Timeout`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
