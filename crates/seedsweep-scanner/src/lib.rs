//! Seedsweep Scanner - The concurrent scanning engine.
//!
//! This crate coordinates a bounded pool of scan workers that generate
//! candidate wallets, deduplicate them, query the balance oracle, and hand
//! funded discoveries to the sweep dispatcher. It provides robust error
//! isolation (one bad query never stops a scan), live statistics, and
//! cooperative cancellation with join-all shutdown.
//!
//! # Features
//!
//! - Fixed-size worker pool sharing one dedup registry, one stats
//!   aggregator and one cancellation token
//! - Single-claim admission control preventing duplicate processing and
//!   duplicate sweeps per address within a session
//! - Re-derivation check before any discovery is trusted
//! - Graceful shutdown: in-flight queries finish, statistics commit, then
//!   workers exit
//!
//! # Example
//!
//! ```rust,ignore
//! use seedsweep_scanner::{ScanEngine, SweepDispatcher};
//! use seedsweep_wallet::CandidateGenerator;
//! use std::sync::Arc;
//!
//! let engine = ScanEngine::new(
//!     Arc::new(CandidateGenerator::new()),
//!     Arc::new(rippled_client),
//!     Arc::new(SweepDispatcher::new(network)),
//! )
//! .with_worker_count(10);
//!
//! let mut session = engine.start();
//! let snapshot = session.snapshot();
//! session.stop().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod dispatch;
pub mod error;
pub mod registry;
pub mod session;
pub mod source;
pub mod stats;
mod worker;

// Re-export commonly used types
pub use dispatch::SweepDispatcher;
pub use error::{Result, ScanError};
pub use registry::AddressRegistry;
pub use session::{ScanEngine, ScanSession};
pub use source::CandidateSource;
pub use stats::{ScanSnapshot, StatsAggregator};
