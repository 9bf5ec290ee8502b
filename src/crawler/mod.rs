//! Discovery crawler
//!
//! This module contains the core crawl logic:
//! - The BFS frontier queue and dispatched-address bookkeeping
//! - The retry policy applied to transport failures
//! - The per-address discovery worker
//! - The wave-based discovery engine that coordinates everything

mod engine;
mod frontier;
mod retry;
mod worker;

pub use engine::{DiscoveryEngine, DiscoveryReport};
pub use frontier::FrontierQueue;
pub use retry::{RetryPolicy, Retryable};

use crate::config::Config;
use crate::executor::CommandExecutor;
use crate::AtlasError;
use std::sync::Arc;

/// Runs a complete discovery crawl
///
/// This is the main entry point: seed the frontier from the configuration,
/// run waves until the frontier drains, and return the inventory report.
///
/// # Arguments
///
/// * `config` - The discovery configuration
/// * `executor` - The command execution backend
///
/// # Returns
///
/// * `Ok(DiscoveryReport)` - The crawl completed (possibly with per-address failures)
/// * `Err(AtlasError)` - The seed set was empty
pub async fn discover(
    config: &Config,
    executor: Arc<dyn CommandExecutor>,
) -> Result<DiscoveryReport, AtlasError> {
    DiscoveryEngine::new(config, executor).run().await
}
