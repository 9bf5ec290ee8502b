//! Per-address discovery worker
//!
//! A worker interrogates exactly one address: identity first (with credential
//! fallback), then, if it wins the claim on that identity, the neighbor
//! table. It communicates only through the shared crawl state; failures are
//! recorded and contained, never propagated to sibling workers or the engine.

use crate::crawler::frontier::FrontierQueue;
use crate::crawler::retry::{Retryable, RetryPolicy};
use crate::device::{DeviceIdentity, NeighborEdge};
use crate::executor::{CommandExecutor, CredentialSet, ExecError};
use crate::facts::{self, SHOW_CDP_NEIGHBORS_DETAIL, SHOW_VERSION};
use crate::state::{FailureLog, VisitedRegistry};
use crate::ParseError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;

/// State shared by every worker of one discovery run
pub(crate) struct CrawlContext {
    pub(crate) executor: Arc<dyn CommandExecutor>,
    pub(crate) credentials: CredentialSet,
    pub(crate) alternate: Option<CredentialSet>,
    pub(crate) connect_timeout: Duration,
    pub(crate) retry: RetryPolicy,
    pub(crate) limiter: Semaphore,
    pub(crate) visited: VisitedRegistry,
    pub(crate) frontier: FrontierQueue,
    pub(crate) results: Mutex<Vec<NeighborEdge>>,
    pub(crate) failures: FailureLog,
    pub(crate) parse_failures: AtomicUsize,
}

/// Failure of one interrogation step
#[derive(Debug, Error)]
pub(crate) enum StepError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Retryable for StepError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Exec(err) => err.is_retryable(),
            Self::Parse(_) => false,
        }
    }
}

/// The interrogated device, after its identity has been claimed
///
/// Carries the credential set that worked for the identity command so the
/// neighbor command reuses it.
struct LocalDevice {
    identity: DeviceIdentity,
    address: String,
    credentials: CredentialSet,
}

enum IdentityOutcome {
    /// Another address already claimed this device
    AlreadyVisited { hostname: String },
    /// This worker holds the claim and proceeds to neighbor retrieval
    Claimed(LocalDevice),
}

struct Expansion {
    edges: usize,
    enqueued: usize,
}

enum Recovery {
    Retry,
    Abort,
}

/// Interrogates one address end to end
///
/// Transport failures retry the whole address within the policy budget; the
/// identity claim survives across attempts, so a retry after a successful
/// claim resumes at neighbor retrieval instead of re-running the claim and
/// mistaking its own mark for a duplicate.
pub(crate) async fn process_address(ctx: Arc<CrawlContext>, address: String) {
    // One permit per interrogation; dropped on every exit path
    let Ok(_permit) = ctx.limiter.acquire().await else {
        return;
    };

    tracing::debug!("Interrogating {}", address);
    let mut attempt: u32 = 1;
    let mut claimed: Option<LocalDevice> = None;

    loop {
        if claimed.is_none() {
            match fetch_identity(&ctx, &address).await {
                Ok(IdentityOutcome::AlreadyVisited { hostname }) => {
                    tracing::debug!("{} resolves to already-visited device {}", address, hostname);
                    return;
                }
                Ok(IdentityOutcome::Claimed(local)) => claimed = Some(local),
                Err(err) => match handle_failure(&ctx, &address, &mut attempt, err).await {
                    Recovery::Retry => continue,
                    Recovery::Abort => return,
                },
            }
        }

        if let Some(local) = &claimed {
            match expand_neighbors(&ctx, local).await {
                Ok(expansion) => {
                    tracing::info!(
                        "{} ({}): {} neighbor edge(s), {} new address(es) enqueued",
                        local.identity.hostname,
                        address,
                        expansion.edges,
                        expansion.enqueued
                    );
                    return;
                }
                Err(err) => match handle_failure(&ctx, &address, &mut attempt, err).await {
                    Recovery::Retry => continue,
                    Recovery::Abort => return,
                },
            }
        }
    }
}

/// Retrieves and claims the device identity behind an address
async fn fetch_identity(ctx: &CrawlContext, address: &str) -> Result<IdentityOutcome, StepError> {
    let (raw, credentials) = execute_with_fallback(ctx, address, SHOW_VERSION).await?;
    let fact = facts::parse_identity(&raw)?;
    let identity = DeviceIdentity::from_fact(&fact);

    if !ctx.visited.claim(&identity.hostname) {
        return Ok(IdentityOutcome::AlreadyVisited {
            hostname: identity.hostname,
        });
    }

    Ok(IdentityOutcome::Claimed(LocalDevice {
        identity,
        address: address.to_string(),
        credentials,
    }))
}

/// Executes a command under the per-connection timeout
///
/// An executor that exceeds the deadline is classified exactly like a
/// reported timeout, so it flows through the normal retry budget.
async fn execute_with_timeout(
    ctx: &CrawlContext,
    address: &str,
    command: &str,
    credentials: &CredentialSet,
) -> Result<String, ExecError> {
    match tokio::time::timeout(
        ctx.connect_timeout,
        ctx.executor.execute(address, command, credentials),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(ExecError::Timeout {
            address: address.to_string(),
        }),
    }
}

/// Executes a command with the default credentials, falling back to the
/// alternate set once on an authentication rejection
async fn execute_with_fallback(
    ctx: &CrawlContext,
    address: &str,
    command: &str,
) -> Result<(String, CredentialSet), StepError> {
    match execute_with_timeout(ctx, address, command, &ctx.credentials).await {
        Ok(raw) => Ok((raw, ctx.credentials.clone())),
        Err(err) if err.is_auth() => match &ctx.alternate {
            Some(alternate) => {
                tracing::info!(
                    "Default credentials rejected by {}; trying alternate set",
                    address
                );
                let raw = execute_with_timeout(ctx, address, command, alternate).await?;
                Ok((raw, alternate.clone()))
            }
            None => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    }
}

/// Retrieves the neighbor table, stamps and appends the edges, and feeds
/// crawl-candidate management addresses back onto the frontier
async fn expand_neighbors(ctx: &CrawlContext, local: &LocalDevice) -> Result<Expansion, StepError> {
    let raw = execute_with_timeout(
        ctx,
        &local.address,
        SHOW_CDP_NEIGHBORS_DETAIL,
        &local.credentials,
    )
    .await?;
    let records = facts::parse_neighbor_detail(&raw)?;

    let mut edges = Vec::with_capacity(records.len());
    let mut enqueued = 0;
    for record in records {
        let edge = NeighborEdge::from_record(&local.identity, &local.address, record);
        if edge.is_crawl_candidate()
            && !edge.management_ip.is_empty()
            && ctx.frontier.push_if_undispatched(&edge.management_ip)
        {
            enqueued += 1;
        }
        edges.push(edge);
    }

    let expansion = Expansion {
        edges: edges.len(),
        enqueued,
    };
    ctx.results.lock().unwrap().extend(edges);

    Ok(expansion)
}

/// Decides between another attempt and terminal failure recording
async fn handle_failure(
    ctx: &CrawlContext,
    address: &str,
    attempt: &mut u32,
    err: StepError,
) -> Recovery {
    if ctx.retry.should_retry(*attempt, &err) {
        tracing::warn!(
            "Attempt {}/{} failed for {}: {}; retrying",
            attempt,
            ctx.retry.max_attempts,
            address,
            err
        );
        *attempt += 1;
        ctx.retry.pause().await;
        return Recovery::Retry;
    }

    match err {
        StepError::Exec(err) if err.is_auth() => {
            tracing::warn!("All credential sets rejected by {}", address);
            ctx.failures.record_auth_failure(address);
        }
        StepError::Exec(err) => {
            tracing::warn!("Giving up on {} after {} attempt(s): {}", address, attempt, err);
            ctx.failures.record_connection_failure(address);
        }
        StepError::Parse(err) => {
            tracing::warn!("Unparseable output from {}: {}", address, err);
            ctx.parse_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    Recovery::Abort
}
