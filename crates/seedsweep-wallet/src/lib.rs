//! Seedsweep Wallet - Candidate generation and address derivation.
//!
//! Generates random BIP-39 recovery phrases from OS entropy and derives the
//! classic-address form for each phrase. Derivation is a pure function: the
//! same phrase always yields the same address, which is what the scan engine
//! relies on for its funded-wallet verification step.

pub mod derive;
pub mod error;
pub mod generator;

// Re-export main types
pub use derive::derive_address;
pub use error::{Result, WalletError};
pub use generator::CandidateGenerator;
