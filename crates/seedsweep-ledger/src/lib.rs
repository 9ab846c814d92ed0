//! Seedsweep Ledger - Remote service clients.
//!
//! This crate holds every client that talks to a remote collaborator on
//! behalf of the scan engine:
//!
//! - the [`BalanceOracle`] trait and its [`RippledClient`] JSON-RPC
//!   implementation, with transient/fatal failure classification and a
//!   bounded [`RetryPolicy`] with linear backoff
//! - the [`FundTransfer`] trait and its HTTP implementation, which delegates
//!   signing and submission to the external transfer service
//! - the [`DiscoveryRegistrar`] trait and its HTTP implementation for the
//!   append-only registration endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use seedsweep_core::{Address, Network};
//! use seedsweep_ledger::{BalanceOracle, RetryPolicy, RippledClient};
//! use std::time::Duration;
//!
//! let client = RippledClient::new(
//!     Network::Testnet,
//!     Duration::from_secs(30),
//!     RetryPolicy::default(),
//! )?;
//!
//! let address = Address::new("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH")?;
//! let balance = client.balance_of(&address).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod oracle;
pub mod register;
pub mod retry;
pub mod rippled;
pub mod transfer;

// Re-export commonly used types
pub use error::LedgerError;
pub use oracle::BalanceOracle;
pub use register::{DiscoveryRegistrar, HttpRegistrar};
pub use retry::RetryPolicy;
pub use rippled::RippledClient;
pub use transfer::{FundTransfer, HttpTransferService, SweepReceipt, SweepRequest};
