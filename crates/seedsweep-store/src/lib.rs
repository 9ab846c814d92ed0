//! Seedsweep Store - Local discovery log.
//!
//! `SQLite`-backed append-only record of every funded wallet the scanner
//! found, used for audit, manual follow-up after failed sweeps, and optional
//! cross-session dedup. Migrations are embedded and applied on open.
//!
//! The log deliberately stores recovery phrases in the clear: it is the
//! operator's own record of wallets they control, kept on their machine.
//!
//! # Example
//!
//! ```ignore
//! use seedsweep_store::DiscoveryStore;
//!
//! let store = DiscoveryStore::open("discoveries.db").await?;
//! let all = store.list().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod discoveries;
pub mod error;

// Re-export commonly used types
pub use discoveries::StoredDiscovery;
pub use error::{Result, StoreError};

use async_trait::async_trait;
use seedsweep_core::{Address, Discovery};
use seedsweep_ledger::DiscoveryRegistrar;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;

/// Handle to the local discovery log.
#[derive(Debug)]
pub struct DiscoveryStore {
    pool: Pool<Sqlite>,
}

impl DiscoveryStore {
    /// Open (or create) the log at `path` and apply pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path
            .as_ref()
            .to_str()
            .ok_or_else(|| StoreError::Open("database path is not valid UTF-8".to_string()))?;

        let options = SqliteConnectOptions::from_str(path_str)
            .map_err(|e| StoreError::Open(format!("invalid connection string: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;

        Self::from_pool(pool).await
    }

    /// Open an in-memory log, for tests and dry runs.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str(":memory:")
            .map_err(|e| StoreError::Open(format!("invalid connection string: {e}")))?;

        // A single connection: each in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: Pool<Sqlite>) -> Result<Self> {
        tracing::debug!("Running discovery store migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Append one discovery.
    pub async fn record(&self, discovery: &Discovery) -> Result<StoredDiscovery> {
        discoveries::record_discovery(&self.pool, discovery).await
    }

    /// All recorded discoveries, oldest first.
    pub async fn list(&self) -> Result<Vec<StoredDiscovery>> {
        discoveries::list_discoveries(&self.pool).await
    }

    /// Number of recorded discoveries.
    pub async fn count(&self) -> Result<i64> {
        discoveries::count(&self.pool).await
    }

    /// Distinct recorded addresses, for cross-session dedup preloading.
    /// Rows that no longer parse as addresses are skipped with a warning.
    pub async fn known_addresses(&self) -> Result<Vec<Address>> {
        let raw = discoveries::known_addresses(&self.pool).await?;
        let mut addresses = Vec::with_capacity(raw.len());
        for value in raw {
            match Address::new(value.as_str()) {
                Ok(address) => addresses.push(address),
                Err(e) => tracing::warn!("skipping unparseable stored address '{value}': {e}"),
            }
        }
        Ok(addresses)
    }

    /// Close the connection pool gracefully.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DiscoveryRegistrar for DiscoveryStore {
    async fn register(&self, discovery: &Discovery) -> seedsweep_core::Result<()> {
        self.record(discovery).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedsweep_core::Drops;

    fn test_discovery(n: u64) -> Discovery {
        let address = match n % 2 {
            0 => "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH",
            _ => "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
        };
        Discovery::new(
            format!("phrase number {n}"),
            Address::new(address).expect("valid address"),
            Drops::new(1_000_000 * (n + 1)),
        )
    }

    #[tokio::test]
    async fn test_record_and_list_round_trip() {
        let store = DiscoveryStore::in_memory().await.expect("open store");

        let discovery = test_discovery(0);
        let stored = store.record(&discovery).await.expect("record discovery");
        assert_eq!(stored.phrase, discovery.phrase);
        assert_eq!(stored.balance_drops, 1_000_000);

        let all = store.list().await.expect("list discoveries");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].address, discovery.address.as_str());
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_known_addresses_deduplicates() {
        let store = DiscoveryStore::in_memory().await.expect("open store");

        // Same address recorded in two sessions
        store.record(&test_discovery(0)).await.expect("record");
        store.record(&test_discovery(2)).await.expect("record");
        store.record(&test_discovery(1)).await.expect("record");

        let known = store.known_addresses().await.expect("known addresses");
        assert_eq!(known.len(), 2);
    }

    #[tokio::test]
    async fn test_registrar_contract() {
        let store = DiscoveryStore::in_memory().await.expect("open store");
        let registrar: &dyn DiscoveryRegistrar = &store;

        registrar
            .register(&test_discovery(0))
            .await
            .expect("register discovery");
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("discoveries.db");

        {
            let store = DiscoveryStore::open(&path).await.expect("open store");
            store.record(&test_discovery(0)).await.expect("record");
            store.close().await;
        }

        // Second open re-runs migrations harmlessly and sees the data
        let store = DiscoveryStore::open(&path).await.expect("reopen store");
        assert_eq!(store.count().await.expect("count"), 1);
    }
}
