//! Scan session errors.

use seedsweep_core::SweepError;
use thiserror::Error;

/// Errors surfaced by a scan session.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The session stopped itself because of a pool-level failure
    /// (candidate generation ran out of entropy).
    #[error("scan session failed: {0}")]
    SessionFailed(String),
}

impl From<ScanError> for SweepError {
    fn from(err: ScanError) -> Self {
        SweepError::Scan(err.to_string())
    }
}

/// Result type alias using `ScanError`.
pub type Result<T> = std::result::Result<T, ScanError>;
