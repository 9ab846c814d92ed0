//! Discovery store errors.

use seedsweep_core::SweepError;
use thiserror::Error;

/// Errors from the local discovery log.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open the database file
    #[error("failed to open discovery store: {0}")]
    Open(String),

    /// A migration failed to apply
    #[error("migration failed: {0}")]
    Migration(String),

    /// A query failed
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A stored row could not be interpreted
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<StoreError> for SweepError {
    fn from(err: StoreError) -> Self {
        SweepError::Store(err.to_string())
    }
}

/// Result type alias using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
