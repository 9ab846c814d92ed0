use seedsweep_core::SweepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("unsupported word count {0}: expected 12, 15, 18, 21 or 24")]
    WordCount(usize),

    #[error("invalid recovery phrase: {0}")]
    Phrase(#[from] bip39::Error),

    #[error("address encoding failed: {0}")]
    Address(String),
}

impl From<WalletError> for SweepError {
    fn from(err: WalletError) -> Self {
        SweepError::Wallet(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
