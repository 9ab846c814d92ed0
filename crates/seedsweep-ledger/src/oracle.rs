//! The balance oracle contract.

use crate::error::Result;
use async_trait::async_trait;
use seedsweep_core::{Address, Drops};

/// A remote service that reports the validated balance of an address.
///
/// Implementations must tolerate arbitrary concurrent invocation; each call
/// behaves as if it had exclusive use of whatever connection it acquires.
/// An address the ledger has never seen reports `Ok(Drops::ZERO)` — that is
/// the common case, not an error.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Look up the balance of `address`, in drops.
    async fn balance_of(&self, address: &Address) -> Result<Drops>;
}
