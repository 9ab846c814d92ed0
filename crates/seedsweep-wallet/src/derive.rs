//! Deterministic phrase-to-address derivation.
//!
//! The classic address is the Base58Check encoding (Ripple alphabet, version
//! byte `0x00`) of a 20-byte account ID obtained by hashing the BIP-39 seed
//! with SHA-256 followed by RIPEMD-160.

use crate::error::{Result, WalletError};
use bip39::{Language, Mnemonic};
use ripemd::Ripemd160;
use seedsweep_core::Address;
use sha2::{Digest, Sha256};

/// Version byte prepended to the account ID before Base58Check encoding.
/// Under the Ripple alphabet it makes every address start with `r`.
const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Derive the classic address controlled by a recovery phrase.
///
/// Pure and deterministic. The phrase is validated against the English
/// BIP-39 word list; the empty passphrase is used for the seed, matching
/// standard wallet behavior.
///
/// # Errors
/// Returns [`WalletError::Phrase`] if the phrase is not a valid mnemonic.
pub fn derive_address(phrase: &str) -> Result<Address> {
    let mnemonic = Mnemonic::parse_in(Language::English, phrase)?;
    let seed = mnemonic.to_seed("");

    let sha = Sha256::digest(seed);
    let account_id = Ripemd160::digest(sha);

    let encoded = bs58::encode(account_id.as_slice())
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check_version(ACCOUNT_ID_VERSION)
        .into_string();

    Address::new(encoded).map_err(|e| WalletError::Address(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_derivation_is_deterministic() {
        let first = derive_address(PHRASE).expect("derive address");
        let second = derive_address(PHRASE).expect("derive address");
        assert_eq!(first, second);
    }

    #[test]
    fn test_derived_address_shape() {
        let address = derive_address(PHRASE).expect("derive address");
        assert!(address.as_str().starts_with('r'));
        // Round-trips through the validating constructor
        assert!(Address::new(address.as_str()).is_ok());
    }

    #[test]
    fn test_different_phrases_differ() {
        let other =
            "legal winner thank year wave sausage worth useful legal winner thank yellow";
        let a = derive_address(PHRASE).expect("derive address");
        let b = derive_address(other).expect("derive address");
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_phrase_rejected() {
        assert!(derive_address("definitely not a mnemonic").is_err());
        assert!(derive_address("").is_err());
        // Valid words but broken checksum
        let bad_checksum =
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(derive_address(bad_checksum).is_err());
    }
}
