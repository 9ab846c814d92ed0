//! The per-task scan loop.

use crate::dispatch::SweepDispatcher;
use crate::registry::AddressRegistry;
use crate::source::CandidateSource;
use crate::stats::StatsAggregator;
use seedsweep_core::Discovery;
use seedsweep_ledger::BalanceOracle;
use std::sync::{Arc, OnceLock};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Everything one worker shares with the rest of the session.
pub(crate) struct WorkerContext {
    pub id: usize,
    pub source: Arc<dyn CandidateSource>,
    pub oracle: Arc<dyn BalanceOracle>,
    pub registry: Arc<AddressRegistry>,
    pub stats: Arc<StatsAggregator>,
    pub dispatcher: Arc<SweepDispatcher>,
    pub discoveries: broadcast::Sender<Discovery>,
    pub cancel: CancellationToken,
    pub failure: Arc<OnceLock<String>>,
}

/// Drive one worker until the session is cancelled.
///
/// Cancellation is only checked between iterations: an iteration that has
/// started runs to completion, so its statistics are committed before the
/// worker exits. Query failures are logged and never stop the loop.
pub(crate) async fn run(ctx: WorkerContext) {
    tracing::debug!(worker = ctx.id, "scan worker started");

    while !ctx.cancel.is_cancelled() {
        let candidate = match ctx.source.candidate() {
            Ok(candidate) => candidate,
            Err(err) => {
                // Losing the entropy source is fatal to the whole session
                let _ = ctx.failure.set(err.to_string());
                tracing::error!(
                    worker = ctx.id,
                    "candidate generation failed, stopping session: {err}"
                );
                ctx.cancel.cancel();
                break;
            }
        };

        // A lost claim is skipped silently: not an attempt, no counters
        if !ctx.registry.try_claim(&candidate.address) {
            continue;
        }

        ctx.stats.record_attempt();

        let balance = match ctx.oracle.balance_of(&candidate.address).await {
            Ok(balance) => balance,
            Err(err) => {
                tracing::warn!(
                    worker = ctx.id,
                    address = %candidate.address,
                    "balance query failed: {err}"
                );
                continue;
            }
        };

        if balance.is_zero() {
            continue;
        }

        // Funded: re-derive the address before trusting the candidate
        match ctx.source.derive(&candidate.phrase) {
            Ok(derived) if derived == candidate.address => {}
            Ok(derived) => {
                tracing::error!(
                    worker = ctx.id,
                    address = %candidate.address,
                    rederived = %derived,
                    "address mismatch on re-derivation, dropping candidate"
                );
                continue;
            }
            Err(err) => {
                tracing::error!(
                    worker = ctx.id,
                    address = %candidate.address,
                    "re-derivation failed, dropping candidate: {err}"
                );
                continue;
            }
        }

        ctx.stats.record_discovery();
        let discovery = Discovery::new(candidate.phrase, candidate.address, balance);
        tracing::info!(
            address = %discovery.address,
            balance = %discovery.balance,
            "found funded wallet"
        );

        // A send with no live subscribers is fine
        let _ = ctx.discoveries.send(discovery.clone());

        ctx.dispatcher.dispatch(&discovery).await;
    }

    tracing::debug!(worker = ctx.id, "scan worker stopped");
}
