//! JSON-RPC balance client for rippled servers.

use crate::error::{LedgerError, Result};
use crate::oracle::BalanceOracle;
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use reqwest::Client;
use seedsweep_core::{Address, Drops, Network};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// rippled error codes that are worth retrying.
const TRANSIENT_CODES: [&str; 4] = ["slowDown", "tooBusy", "noNetwork", "noCurrent"];

/// Balance oracle backed by a rippled JSON-RPC endpoint.
///
/// The underlying HTTP client pools connections; every request checks one
/// out for exclusive use and returns it on every exit path, so concurrent
/// queries never share per-request state.
pub struct RippledClient {
    http: Client,
    url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'static str,
    params: [AccountInfoParams<'a>; 1],
}

#[derive(Serialize)]
struct AccountInfoParams<'a> {
    account: &'a str,
    ledger_index: &'static str,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: RpcResult,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    account_data: Option<AccountData>,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    #[serde(rename = "Balance")]
    balance: String,
}

impl RippledClient {
    /// Create a client against the default endpoint of `network`.
    pub fn new(network: Network, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        Self::with_url(network.json_rpc_url(), timeout, retry)
    }

    /// Create a client against a specific JSON-RPC endpoint.
    pub fn with_url(url: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Fatal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: url.into(),
            retry,
        })
    }

    /// The endpoint this client queries.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// One `account_info` round trip, without retries.
    async fn account_info(&self, address: &Address) -> Result<Drops> {
        let request = RpcRequest {
            method: "account_info",
            params: [AccountInfoParams {
                account: address.as_str(),
                ledger_index: "validated",
            }],
        };

        let response = self.http.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(LedgerError::Transient(format!(
                "rippled returned HTTP {status}"
            )));
        }
        if !status.is_success() {
            return Err(LedgerError::Fatal(format!(
                "rippled returned HTTP {status}"
            )));
        }

        let body: RpcResponse = response.json().await?;
        interpret(body.result)
    }
}

/// Map a JSON-RPC result into the classified balance outcome.
fn interpret(result: RpcResult) -> Result<Drops> {
    match result.error.as_deref() {
        // Never-funded addresses are the common case, not a failure
        Some("actNotFound") => Ok(Drops::ZERO),
        Some(code) if TRANSIENT_CODES.contains(&code) => Err(LedgerError::Transient(format!(
            "rippled error '{code}'"
        ))),
        Some(code) => Err(LedgerError::Fatal(format!("rippled error '{code}'"))),
        None => {
            let account_data = result.account_data.ok_or_else(|| {
                LedgerError::Fatal("account_info response missing account_data".to_string())
            })?;
            account_data
                .balance
                .parse::<u64>()
                .map(Drops::new)
                .map_err(|e| {
                    LedgerError::Fatal(format!(
                        "unparseable balance '{}': {e}",
                        account_data.balance
                    ))
                })
        }
    }
}

#[async_trait]
impl BalanceOracle for RippledClient {
    async fn balance_of(&self, address: &Address) -> Result<Drops> {
        self.retry.run(|| self.account_info(address)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_from_json(json: &str) -> RpcResult {
        let response: RpcResponse =
            serde_json::from_str(&format!("{{\"result\":{json}}}")).expect("parse RPC response");
        response.result
    }

    #[test]
    fn test_funded_account() {
        let result = result_from_json(
            r#"{"status":"success","account_data":{"Balance":"5000000","Sequence":1}}"#,
        );
        let drops = interpret(result).expect("funded account parses");
        assert_eq!(drops, Drops::new(5_000_000));
        assert_eq!(drops.as_xrp(), 5.0);
    }

    #[test]
    fn test_not_found_is_zero_balance() {
        let result = result_from_json(r#"{"status":"error","error":"actNotFound"}"#);
        let drops = interpret(result).expect("actNotFound is a zero balance");
        assert!(drops.is_zero());
    }

    #[test]
    fn test_throttling_is_transient() {
        for code in TRANSIENT_CODES {
            let result = result_from_json(&format!(r#"{{"error":"{code}"}}"#));
            let err = interpret(result).expect_err("throttling should fail");
            assert!(err.is_transient(), "'{code}' should be transient");
        }
    }

    #[test]
    fn test_malformed_account_is_fatal() {
        let result = result_from_json(r#"{"status":"error","error":"actMalformed"}"#);
        let err = interpret(result).expect_err("malformed account should fail");
        assert!(matches!(err, LedgerError::Fatal(_)));
    }

    #[test]
    fn test_missing_account_data_is_fatal() {
        let result = result_from_json(r#"{"status":"success"}"#);
        let err = interpret(result).expect_err("missing account_data should fail");
        assert!(matches!(err, LedgerError::Fatal(_)));
    }

    #[test]
    fn test_unparseable_balance_is_fatal() {
        let result = result_from_json(r#"{"account_data":{"Balance":"lots"}}"#);
        let err = interpret(result).expect_err("bad balance should fail");
        assert!(matches!(err, LedgerError::Fatal(_)));
    }

    #[test]
    fn test_request_shape() {
        let address = Address::new("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH").expect("valid address");
        let request = RpcRequest {
            method: "account_info",
            params: [AccountInfoParams {
                account: address.as_str(),
                ledger_index: "validated",
            }],
        };
        let json = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(json["method"], "account_info");
        assert_eq!(json["params"][0]["account"], address.as_str());
        assert_eq!(json["params"][0]["ledger_index"], "validated");
    }
}
