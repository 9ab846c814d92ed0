//! Ledger failure classification.
//!
//! Every balance query failure is tagged as either transient (retryable) or
//! fatal (surfaced immediately); downstream code never re-classifies by
//! inspecting response fields.

use seedsweep_core::SweepError;
use thiserror::Error;

/// Classified failure of a ledger query.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Network or service failure worth retrying (timeouts, connection
    /// errors, 5xx responses, server-side throttling).
    #[error("transient ledger failure: {0}")]
    Transient(String),

    /// Non-retryable failure (malformed request, unexpected response shape,
    /// unknown error codes).
    #[error("fatal ledger failure: {0}")]
    Fatal(String),
}

impl LedgerError {
    /// Whether the retry policy should try this query again.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        // A malformed request or response body will not get better on retry
        if err.is_builder() || err.is_decode() {
            Self::Fatal(err.to_string())
        } else {
            Self::Transient(err.to_string())
        }
    }
}

impl From<LedgerError> for SweepError {
    fn from(err: LedgerError) -> Self {
        SweepError::Ledger(err.to_string())
    }
}

/// Result type alias using `LedgerError`.
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(LedgerError::Transient("timeout".to_string()).is_transient());
        assert!(!LedgerError::Fatal("bad request".to_string()).is_transient());
    }

    #[test]
    fn test_display() {
        let err = LedgerError::Transient("connection reset".to_string());
        assert_eq!(err.to_string(), "transient ledger failure: connection reset");
    }
}
