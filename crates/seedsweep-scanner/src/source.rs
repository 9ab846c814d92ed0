//! The candidate source contract.

use seedsweep_core::{Address, Candidate};
use seedsweep_wallet::{CandidateGenerator, WalletError};

/// Supplies candidate wallets to the scan workers.
///
/// Both operations are fast, in-memory and non-suspending. `derive` must be
/// deterministic: workers re-derive the address of every funded candidate
/// and drop the candidate on mismatch, which protects against a corrupted
/// generator ever producing a bogus discovery.
pub trait CandidateSource: Send + Sync {
    /// Produce one fresh candidate.
    ///
    /// An error here means the entropy source is gone and ends the whole
    /// session.
    fn candidate(&self) -> Result<Candidate, WalletError>;

    /// Re-derive the address controlled by `phrase`.
    fn derive(&self, phrase: &str) -> Result<Address, WalletError>;
}

impl CandidateSource for CandidateGenerator {
    fn candidate(&self) -> Result<Candidate, WalletError> {
        self.generate()
    }

    fn derive(&self, phrase: &str) -> Result<Address, WalletError> {
        seedsweep_wallet::derive_address(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_satisfies_contract() {
        let source: &dyn CandidateSource = &CandidateGenerator::new();
        let candidate = source.candidate().expect("generate candidate");
        let rederived = source.derive(&candidate.phrase).expect("re-derive");
        assert_eq!(rederived, candidate.address);
    }
}
