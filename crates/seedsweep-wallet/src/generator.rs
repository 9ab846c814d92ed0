//! Random candidate generation.

use crate::derive::derive_address;
use crate::error::{Result, WalletError};
use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use seedsweep_core::Candidate;

/// Word counts the BIP-39 standard allows.
const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Produces fresh random recovery phrases and their derived addresses.
///
/// Entropy comes solely from the operating system RNG, so phrases are drawn
/// uniformly from the full phrase space. The generator keeps no internal
/// counter or state between calls.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    word_count: usize,
}

impl CandidateGenerator {
    /// Create a generator producing 12-word phrases.
    #[must_use]
    pub fn new() -> Self {
        Self { word_count: 12 }
    }

    /// Create a generator with a specific phrase length.
    ///
    /// # Errors
    /// Returns [`WalletError::WordCount`] unless `word_count` is one of
    /// 12, 15, 18, 21 or 24.
    pub fn with_word_count(word_count: usize) -> Result<Self> {
        if VALID_WORD_COUNTS.contains(&word_count) {
            Ok(Self { word_count })
        } else {
            Err(WalletError::WordCount(word_count))
        }
    }

    /// The phrase length this generator produces.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Generate one candidate wallet.
    ///
    /// # Errors
    /// Returns [`WalletError::Entropy`] if the OS entropy source fails; the
    /// caller treats this as fatal to the whole scan session.
    pub fn generate(&self) -> Result<Candidate> {
        // Every 3 words encode 32 bits of entropy
        let mut entropy = vec![0u8; self.word_count / 3 * 4];
        OsRng
            .try_fill_bytes(&mut entropy)
            .map_err(|e| WalletError::Entropy(e.to_string()))?;

        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)?;
        let phrase = mnemonic.to_string();
        let address = derive_address(&phrase)?;

        Ok(Candidate { phrase, address })
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new()
    }
}
