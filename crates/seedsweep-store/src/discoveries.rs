//! Row operations for the `discoveries` table.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use seedsweep_core::Discovery;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

/// One recorded discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDiscovery {
    /// Unique identifier for this record
    pub id: String,
    /// Recovery phrase controlling the funds
    pub phrase: String,
    /// The funded address
    pub address: String,
    /// Balance in drops at discovery time
    pub balance_drops: i64,
    /// When the discovery was made
    pub discovered_at: DateTime<Utc>,
}

/// Append one discovery to the log.
pub async fn record_discovery(
    pool: &Pool<Sqlite>,
    discovery: &Discovery,
) -> Result<StoredDiscovery> {
    let id = uuid::Uuid::new_v4().to_string();
    let balance_drops = i64::try_from(discovery.balance.as_u64())
        .map_err(|_| StoreError::Corrupt("balance exceeds i64 range".to_string()))?;
    let discovered_at = *discovery.discovered_at.as_datetime();

    sqlx::query(
        "INSERT INTO discoveries (id, phrase, address, balance_drops, discovered_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&discovery.phrase)
    .bind(discovery.address.as_str())
    .bind(balance_drops)
    .bind(discovered_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(StoredDiscovery {
        id,
        phrase: discovery.phrase.clone(),
        address: discovery.address.as_str().to_string(),
        balance_drops,
        discovered_at,
    })
}

/// All recorded discoveries, oldest first.
pub async fn list_discoveries(pool: &Pool<Sqlite>) -> Result<Vec<StoredDiscovery>> {
    let rows = sqlx::query(
        "SELECT id, phrase, address, balance_drops, discovered_at
         FROM discoveries ORDER BY discovered_at ASC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(row_to_discovery).collect()
}

/// Distinct addresses the log already knows about.
pub async fn known_addresses(pool: &Pool<Sqlite>) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT DISTINCT address FROM discoveries")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| row.get::<String, _>("address"))
        .collect())
}

/// Number of recorded discoveries.
pub async fn count(pool: &Pool<Sqlite>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM discoveries")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn row_to_discovery(row: SqliteRow) -> Result<StoredDiscovery> {
    let discovered_at: String = row.get("discovered_at");
    let discovered_at = DateTime::parse_from_rfc3339(&discovered_at)
        .map_err(|e| StoreError::Corrupt(format!("invalid discovered_at: {e}")))?
        .with_timezone(&Utc);

    Ok(StoredDiscovery {
        id: row.get("id"),
        phrase: row.get("phrase"),
        address: row.get("address"),
        balance_drops: row.get("balance_drops"),
        discovered_at,
    })
}
