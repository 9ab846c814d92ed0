//! Seedsweep Core - Foundation crate for the Seedsweep scanning engine.
//!
//! This crate provides the shared types, error handling and configuration
//! management that all other Seedsweep crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and domain records (`Address`, `Drops`,
//!   `Network`, `Candidate`, `Discovery`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use seedsweep_core::{AppConfig, Drops, Network};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.ledger.network, Network::Testnet);
//!
//! let balance = Drops::new(5_000_000);
//! assert_eq!(balance.as_xrp(), 5.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, LedgerConfig, RegistrationConfig, RetryConfig, ScanConfig, StoreConfig, SweepConfig};
pub use error::{ConfigError, ConfigResult, Result, SweepError};
pub use types::{Address, Candidate, Discovery, Drops, Network, Timestamp};
