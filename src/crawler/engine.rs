//! Discovery engine - wave-based crawl orchestration
//!
//! The engine owns the frontier, the visited registry, the result collection
//! and the failure log, and runs the crawl in discrete waves: drain up to the
//! concurrency limit from the frontier, dispatch one worker per address, wait
//! for the whole batch, re-check the queue. An empty drained batch is the
//! termination condition; it is stable because the visited registry only
//! grows and is bounded by the number of distinct devices.

use crate::config::Config;
use crate::crawler::frontier::FrontierQueue;
use crate::crawler::retry::RetryPolicy;
use crate::crawler::worker::{process_address, CrawlContext};
use crate::device::NeighborEdge;
use crate::executor::CommandExecutor;
use crate::state::{FailureLog, VisitedRegistry};
use crate::AtlasError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Everything a discovery run produced
///
/// Edges preserve per-worker append order but carry no ordering guarantee
/// across devices; consumers group by `local_host`.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// All neighbor edges, one per adjacency advertisement
    pub edges: Vec<NeighborEdge>,

    /// Sorted, deduplicated hostnames of every interrogated device
    pub hostnames: Vec<String>,

    /// Addresses whose credentials were rejected, sorted
    pub auth_failures: Vec<String>,

    /// Addresses that stayed unreachable through the retry budget, sorted
    pub connection_failures: Vec<String>,

    /// Number of addresses whose output could not be parsed
    pub parse_failures: usize,

    /// Number of dispatch waves the crawl ran
    pub waves: usize,
}

impl DiscoveryReport {
    /// Number of distinct devices interrogated
    pub fn device_count(&self) -> usize {
        self.hostnames.len()
    }

    /// Number of addresses that failed terminally
    pub fn failure_count(&self) -> usize {
        self.auth_failures.len() + self.connection_failures.len()
    }
}

/// Main crawl orchestrator
pub struct DiscoveryEngine {
    context: Arc<CrawlContext>,
    seeds: Vec<String>,
    concurrency_limit: usize,
    run_timeout: Option<Duration>,
    waves: AtomicUsize,
}

impl DiscoveryEngine {
    /// Creates an engine for one discovery run
    pub fn new(config: &Config, executor: Arc<dyn CommandExecutor>) -> Self {
        let discovery = &config.discovery;

        let context = Arc::new(CrawlContext {
            executor,
            credentials: config.credentials.default_set(),
            alternate: config.credentials.alternate_set(),
            connect_timeout: Duration::from_secs(discovery.connect_timeout_secs),
            retry: RetryPolicy::new(
                discovery.max_connect_attempts,
                Duration::from_secs(discovery.retry_backoff_secs),
            ),
            limiter: Semaphore::new(discovery.concurrency_limit),
            visited: VisitedRegistry::new(),
            frontier: FrontierQueue::new(),
            results: Mutex::new(Vec::new()),
            failures: FailureLog::new(),
            parse_failures: AtomicUsize::new(0),
        });

        let run_timeout = match discovery.run_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            context,
            seeds: discovery.seeds.clone(),
            concurrency_limit: discovery.concurrency_limit,
            run_timeout,
            waves: AtomicUsize::new(0),
        }
    }

    /// Runs discovery to completion and returns the report
    ///
    /// The only fatal error is an empty seed set. Per-address failures are
    /// contained and reported; a run that exceeds the configured whole-run
    /// timeout is cancelled cooperatively and still reports everything
    /// appended so far.
    pub async fn run(&self) -> Result<DiscoveryReport, AtlasError> {
        if self.seeds.iter().all(|seed| seed.trim().is_empty()) {
            return Err(AtlasError::NoSeeds);
        }

        for seed in &self.seeds {
            self.context.frontier.push(seed);
        }
        tracing::info!("Starting discovery from {} seed address(es)", self.seeds.len());

        match self.run_timeout {
            Some(limit) => {
                // Dropping the wave JoinSet aborts in-flight workers at
                // their next suspension point; appended results survive.
                if tokio::time::timeout(limit, self.run_waves()).await.is_err() {
                    tracing::warn!(
                        "Discovery exceeded the {:?} run timeout; reporting partial results",
                        limit
                    );
                }
            }
            None => self.run_waves().await,
        }

        let report = self.report();
        tracing::info!(
            "Discovery finished: {} device(s), {} edge(s), {} failed address(es) in {} wave(s)",
            report.device_count(),
            report.edges.len(),
            report.failure_count(),
            report.waves
        );

        Ok(report)
    }

    async fn run_waves(&self) {
        loop {
            let batch = self.context.frontier.drain_batch(self.concurrency_limit);
            if batch.is_empty() {
                break;
            }

            let wave = self.waves.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::info!(
                "Wave {}: dispatching {} address(es), {} pending",
                wave,
                batch.len(),
                self.context.frontier.len()
            );

            let mut workers = JoinSet::new();
            for address in batch {
                let ctx = Arc::clone(&self.context);
                workers.spawn(process_address(ctx, address));
            }

            // Full join point: wave N+1 only starts once wave N has drained
            while let Some(joined) = workers.join_next().await {
                if let Err(err) = joined {
                    if err.is_panic() {
                        tracing::error!("Discovery worker panicked: {}", err);
                    }
                }
            }
        }
    }

    fn report(&self) -> DiscoveryReport {
        DiscoveryReport {
            edges: self.context.results.lock().unwrap().clone(),
            hostnames: self.context.visited.hostnames(),
            auth_failures: self.context.failures.auth_failures(),
            connection_failures: self.context.failures.connection_failures(),
            parse_failures: self.context.parse_failures.load(Ordering::Relaxed),
            waves: self.waves.load(Ordering::Relaxed),
        }
    }
}
