//! Shared types used across the Seedsweep engine.
//!
//! This module defines common newtypes and domain records that provide type
//! safety and clear domain modeling.

use crate::error::SweepError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for classic XRP Ledger addresses with validation.
///
/// Addresses are Base58Check-encoded in the Ripple alphabet and always start
/// with `r`, followed by 24-34 alphabet characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create a new `Address` from a string.
    ///
    /// # Errors
    /// Returns error if the string is not a well-formed classic address.
    pub fn new(addr: impl Into<String>) -> Result<Self, SweepError> {
        let addr = addr.into();
        Self::validate(&addr)?;
        Ok(Self(addr))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the classic address form: `r` + 24-34 Ripple-alphabet chars.
    fn validate(addr: &str) -> Result<(), SweepError> {
        static ADDRESS_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = ADDRESS_REGEX.get_or_init(|| {
            Regex::new(r"^r[1-9A-HJ-NP-Za-km-z]{24,34}$").expect("valid regex")
        });

        if regex.is_match(addr) {
            Ok(())
        } else {
            Err(SweepError::Validation(format!(
                "invalid address: must be a classic XRPL address, got '{addr}'"
            )))
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ledger balance in drops, the integer minor unit of XRP.
///
/// 1 XRP = 1,000,000 drops. All balance comparisons in the engine are done on
/// this integer representation; [`Drops::as_xrp`] exists for display only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Drops(u64);

impl Drops {
    /// Drops per whole XRP.
    pub const PER_XRP: u64 = 1_000_000;

    /// The zero balance.
    pub const ZERO: Self = Self(0);

    /// Create a balance from a raw drop count.
    #[must_use]
    pub const fn new(drops: u64) -> Self {
        Self(drops)
    }

    /// Get the raw drop count.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Convert to XRP for display purposes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_xrp(self) -> f64 {
        self.0 as f64 / Self::PER_XRP as f64
    }

    /// Whether this balance is zero (the unfunded common case).
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Drops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} XRP", self.as_xrp())
    }
}

impl FromStr for Drops {
    type Err = SweepError;

    /// Parse a decimal drop count, the form rippled reports balances in.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| SweepError::Validation(format!("invalid drop count '{s}': {e}")))
    }
}

/// XRP Ledger network selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The altnet test network. Default so that misconfiguration never
    /// touches real funds.
    #[default]
    Testnet,
    /// The production network.
    Mainnet,
}

impl Network {
    /// Default JSON-RPC endpoint for this network.
    #[must_use]
    pub fn json_rpc_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://s1.ripple.com:51234/",
            Self::Testnet => "https://s.altnet.rippletest.net:51234/",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Testnet => write!(f, "testnet"),
            Self::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for Network {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(SweepError::Validation(format!(
                "invalid network '{other}': expected 'testnet' or 'mainnet'"
            ))),
        }
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, SweepError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| SweepError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// A freshly generated recovery phrase and its derived address.
///
/// Produced by the candidate generator, consumed by exactly one worker
/// iteration and never persisted unless funded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// The space-separated recovery phrase.
    pub phrase: String,
    /// The address deterministically derived from the phrase.
    pub address: Address,
}

/// A funded wallet found by the scan.
///
/// Constructed exactly once per funded address, only after the balance check
/// and the re-derivation check both passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discovery {
    /// The recovery phrase that controls the funds.
    pub phrase: String,
    /// The funded address.
    pub address: Address,
    /// Balance at discovery time, always non-zero.
    pub balance: Drops,
    /// When the discovery was made.
    pub discovered_at: Timestamp,
}

impl Discovery {
    /// Build a discovery record stamped with the current time.
    #[must_use]
    pub fn new(phrase: String, address: Address, balance: Drops) -> Self {
        debug_assert!(!balance.is_zero(), "a discovery always carries funds");
        Self {
            phrase,
            address,
            balance,
            discovered_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_valid() {
        let valid = vec![
            "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH",
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "r9cZA1mLK5R5Am25ArfXFmqgNwjZgnfk59",
        ];
        for addr in valid {
            assert!(Address::new(addr).is_ok(), "should accept: {addr}");
        }
    }

    #[test]
    fn test_address_invalid() {
        let invalid = vec![
            "",
            "rshort",
            "xN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH",  // wrong prefix
            "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzR0",  // '0' not in alphabet
            "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRHrN7n7otQDd6", // too long
        ];
        for addr in invalid {
            assert!(Address::new(addr).is_err(), "should reject: {addr}");
        }
    }

    #[test]
    fn test_drops_conversion() {
        assert_eq!(Drops::new(5_000_000).as_xrp(), 5.0);
        assert_eq!(Drops::new(1).as_xrp(), 0.000_001);
        assert_eq!(Drops::ZERO.as_u64(), 0);
        assert!(Drops::ZERO.is_zero());
        assert!(!Drops::new(1).is_zero());
    }

    #[test]
    fn test_drops_parse() {
        let drops: Drops = "12345678".parse().expect("parse drop count");
        assert_eq!(drops, Drops::new(12_345_678));
        assert!("12.5".parse::<Drops>().is_err());
        assert!("-1".parse::<Drops>().is_err());
    }

    #[test]
    fn test_drops_display() {
        assert_eq!(Drops::new(5_000_000).to_string(), "5 XRP");
        assert_eq!(Drops::new(1_500_000).to_string(), "1.5 XRP");
    }

    #[test]
    fn test_network_round_trip() {
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("devnet".parse::<Network>().is_err());
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
    }

    #[test]
    fn test_network_urls() {
        assert!(Network::Mainnet.json_rpc_url().contains("s1.ripple.com"));
        assert!(Network::Testnet.json_rpc_url().contains("altnet"));
    }

    #[test]
    fn test_network_default_is_testnet() {
        assert_eq!(Network::default(), Network::Testnet);
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = Timestamp::now();
        let s = ts.to_rfc3339();
        let parsed = Timestamp::from_rfc3339(&s).expect("parse RFC3339 timestamp");
        assert_eq!(ts.as_datetime().timestamp(), parsed.as_datetime().timestamp());
    }

    #[test]
    fn test_discovery_carries_timestamp() {
        let address = Address::new("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH").expect("valid address");
        let discovery = Discovery::new("a b c".to_string(), address, Drops::new(5_000_000));
        assert_eq!(discovery.balance.as_xrp(), 5.0);
        assert!(!discovery.discovered_at.to_rfc3339().is_empty());
    }

    #[test]
    fn test_drops_serde_transparent() {
        let json = serde_json::to_string(&Drops::new(42)).expect("serialize drops");
        assert_eq!(json, "42");
        let parsed: Drops = serde_json::from_str("42").expect("deserialize drops");
        assert_eq!(parsed, Drops::new(42));
    }
}
