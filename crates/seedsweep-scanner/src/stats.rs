//! Live scan statistics.

use seedsweep_core::Timestamp;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Collects per-attempt counters from all workers.
///
/// The counters are commutative, so the order in which workers apply them is
/// irrelevant; atomics keep every update from racing or being lost. After
/// every record call and in every snapshot,
/// `found_with_funds <= processed_count <= total_attempts` holds.
#[derive(Debug)]
pub struct StatsAggregator {
    total_attempts: AtomicU64,
    processed_count: AtomicU64,
    found_with_funds: AtomicU64,
    started_at: Timestamp,
    clock: Instant,
}

impl StatsAggregator {
    /// Create an aggregator whose elapsed time starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_attempts: AtomicU64::new(0),
            processed_count: AtomicU64::new(0),
            found_with_funds: AtomicU64::new(0),
            started_at: Timestamp::now(),
            clock: Instant::now(),
        }
    }

    /// Record one address entering the query stage.
    ///
    /// Called after a won dedup claim and before the balance query resolves,
    /// so partial progress stays visible even if the query later fails.
    pub fn record_attempt(&self) {
        // total first: processed must never exceed it in any snapshot
        self.total_attempts.fetch_add(1, Ordering::SeqCst);
        self.processed_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Record one verified funded discovery.
    pub fn record_discovery(&self) {
        self.found_with_funds.fetch_add(1, Ordering::SeqCst);
    }

    /// Take a consistent snapshot of the counters.
    #[must_use]
    pub fn snapshot(&self) -> ScanSnapshot {
        // Read in the reverse order of updates so the counter ordering holds
        // even while workers are mid-record.
        let found_with_funds = self.found_with_funds.load(Ordering::SeqCst);
        let processed_count = self.processed_count.load(Ordering::SeqCst);
        let total_attempts = self.total_attempts.load(Ordering::SeqCst);

        ScanSnapshot {
            processed_count,
            total_attempts,
            found_with_funds,
            started_at: self.started_at,
            elapsed: self.clock.elapsed(),
        }
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// A consistent view of the scan counters at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSnapshot {
    /// Addresses that entered the query stage.
    pub processed_count: u64,
    /// Total attempts, including ones whose query later failed.
    pub total_attempts: u64,
    /// Verified funded discoveries.
    pub found_with_funds: u64,
    /// Wall-clock session start.
    pub started_at: Timestamp,
    /// Time since the session started.
    pub elapsed: Duration,
}

impl ScanSnapshot {
    /// Addresses processed per second since the session started.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.processed_count as f64 / secs
        } else {
            0.0
        }
    }

    /// Fraction of processed addresses that turned out funded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_probability(&self) -> f64 {
        if self.processed_count == 0 {
            0.0
        } else {
            self.found_with_funds as f64 / self.processed_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_start_at_zero() {
        let snapshot = StatsAggregator::new().snapshot();
        assert_eq!(snapshot.total_attempts, 0);
        assert_eq!(snapshot.processed_count, 0);
        assert_eq!(snapshot.found_with_funds, 0);
    }

    #[test]
    fn test_record_sequence() {
        let stats = StatsAggregator::new();
        stats.record_attempt();
        stats.record_attempt();
        stats.record_discovery();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_attempts, 2);
        assert_eq!(snapshot.processed_count, 2);
        assert_eq!(snapshot.found_with_funds, 1);
    }

    #[test]
    fn test_ordering_holds_under_concurrency() {
        let stats = Arc::new(StatsAggregator::new());

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let stats = stats.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        stats.record_attempt();
                        stats.record_discovery();
                    }
                })
            })
            .collect();

        // Snapshot continuously while the writers hammer the counters
        for _ in 0..1000 {
            let s = stats.snapshot();
            assert!(s.found_with_funds <= s.processed_count);
            assert!(s.processed_count <= s.total_attempts);
        }

        for writer in writers {
            writer.join().expect("writer thread panicked");
        }

        let s = stats.snapshot();
        assert_eq!(s.total_attempts, 2000);
        assert_eq!(s.processed_count, 2000);
        assert_eq!(s.found_with_funds, 2000);
    }

    #[test]
    fn test_rate_and_probability() {
        let stats = StatsAggregator::new();
        assert_eq!(stats.snapshot().success_probability(), 0.0);

        stats.record_attempt();
        stats.record_attempt();
        stats.record_attempt();
        stats.record_attempt();
        stats.record_discovery();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.success_probability(), 0.25);
        assert!(snapshot.rate() >= 0.0);
    }
}
