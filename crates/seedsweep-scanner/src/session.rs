//! Worker pool lifecycle: start, observe, stop.

use crate::dispatch::SweepDispatcher;
use crate::error::{Result, ScanError};
use crate::registry::AddressRegistry;
use crate::source::CandidateSource;
use crate::stats::{ScanSnapshot, StatsAggregator};
use crate::worker::{self, WorkerContext};
use seedsweep_core::{Address, Discovery};
use seedsweep_ledger::BalanceOracle;
use std::sync::{Arc, OnceLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Default number of concurrent scan workers.
const DEFAULT_WORKER_COUNT: usize = 10;

/// Capacity of the discovery broadcast channel.
const DISCOVERY_CHANNEL_CAPACITY: usize = 64;

/// Builds scan sessions from the engine's collaborators.
///
/// Every [`start`](Self::start) call produces an independent session with a
/// fresh dedup registry, fresh statistics and a fresh discovery channel.
pub struct ScanEngine {
    source: Arc<dyn CandidateSource>,
    oracle: Arc<dyn BalanceOracle>,
    dispatcher: Arc<SweepDispatcher>,
    worker_count: usize,
    known_addresses: Vec<Address>,
}

impl ScanEngine {
    /// Create an engine around its three collaborators.
    #[must_use]
    pub fn new(
        source: Arc<dyn CandidateSource>,
        oracle: Arc<dyn BalanceOracle>,
        dispatcher: Arc<SweepDispatcher>,
    ) -> Self {
        Self {
            source,
            oracle,
            dispatcher,
            worker_count: DEFAULT_WORKER_COUNT,
            known_addresses: Vec::new(),
        }
    }

    /// Set the number of concurrent workers. Zero is clamped to one.
    #[must_use]
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count.max(1);
        self
    }

    /// Seed every session's dedup registry with already-known addresses
    /// (cross-session dedup against the discovery log).
    #[must_use]
    pub fn with_known_addresses(mut self, addresses: Vec<Address>) -> Self {
        self.known_addresses = addresses;
        self
    }

    /// Launch a new scan session.
    ///
    /// Spawns exactly the configured number of workers sharing one registry,
    /// one aggregator and one cancellation token, then returns immediately.
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(&self) -> ScanSession {
        let registry = Arc::new(AddressRegistry::new());
        registry.preload(self.known_addresses.iter().cloned());

        let stats = Arc::new(StatsAggregator::new());
        let cancel = CancellationToken::new();
        let failure = Arc::new(OnceLock::new());
        let (discoveries, _) = broadcast::channel(DISCOVERY_CHANNEL_CAPACITY);

        let workers: Vec<JoinHandle<()>> = (0..self.worker_count)
            .map(|id| {
                tokio::spawn(worker::run(WorkerContext {
                    id,
                    source: self.source.clone(),
                    oracle: self.oracle.clone(),
                    registry: registry.clone(),
                    stats: stats.clone(),
                    dispatcher: self.dispatcher.clone(),
                    discoveries: discoveries.clone(),
                    cancel: cancel.clone(),
                    failure: failure.clone(),
                }))
            })
            .collect();

        tracing::info!(workers = workers.len(), "scan session started");

        ScanSession {
            cancel,
            workers,
            stats,
            registry,
            discoveries,
            failure,
        }
    }
}

/// A running (or stopped) scan session.
pub struct ScanSession {
    cancel: CancellationToken,
    workers: Vec<JoinHandle<()>>,
    stats: Arc<StatsAggregator>,
    registry: Arc<AddressRegistry>,
    discoveries: broadcast::Sender<Discovery>,
    failure: Arc<OnceLock<String>>,
}

impl ScanSession {
    /// Current counter snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ScanSnapshot {
        self.stats.snapshot()
    }

    /// Number of addresses claimed so far in this session.
    #[must_use]
    pub fn claimed_addresses(&self) -> usize {
        self.registry.len()
    }

    /// Subscribe to discoveries made after this call. The stream stays open
    /// until the session stops.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Discovery> {
        self.discoveries.subscribe()
    }

    /// Whether cancellation has been requested (by [`stop`](Self::stop) or
    /// by a pool-level failure).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait until cancellation is requested.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// Stop the session and wait for every worker to finish.
    ///
    /// Workers complete their in-flight iteration first, so all statistics
    /// are committed when this returns and none mutate afterwards.
    /// Idempotent: calling it again is a no-op.
    ///
    /// # Errors
    /// Returns [`ScanError::SessionFailed`] if the session had stopped
    /// itself because of a pool-level failure.
    pub async fn stop(&mut self) -> Result<()> {
        self.cancel.cancel();

        for worker in self.workers.drain(..) {
            if let Err(e) = worker.await {
                if e.is_panic() {
                    tracing::error!("scan worker panicked: {e}");
                }
            }
        }

        if let Some(reason) = self.failure.get() {
            return Err(ScanError::SessionFailed(reason.clone()));
        }
        Ok(())
    }
}
