//! Forward DNS resolution for discovered hostnames
//!
//! Runs once, after the crawl has drained, and is fully independent of it: a
//! hostname that does not resolve is reported as such and nothing else
//! changes. Lookups go through the system resolver via the runtime.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use tokio::task::JoinSet;

/// Result of resolving one hostname
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved(IpAddr),
    Failed,
}

impl fmt::Display for ResolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(addr) => write!(f, "{}", addr),
            Self::Failed => write!(f, "DNS resolution failed"),
        }
    }
}

/// Resolves every hostname concurrently, returning outcomes keyed by hostname
pub async fn resolve_hostnames(hostnames: &[String]) -> BTreeMap<String, ResolveOutcome> {
    let mut lookups = JoinSet::new();
    for hostname in hostnames {
        let hostname = hostname.clone();
        lookups.spawn(async move {
            let outcome = resolve_one(&hostname).await;
            (hostname, outcome)
        });
    }

    let mut outcomes = BTreeMap::new();
    while let Some(joined) = lookups.join_next().await {
        if let Ok((hostname, outcome)) = joined {
            outcomes.insert(hostname, outcome);
        }
    }
    outcomes
}

async fn resolve_one(hostname: &str) -> ResolveOutcome {
    tracing::debug!("Resolving A record for {}", hostname);
    match tokio::net::lookup_host((hostname, 0u16)).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => ResolveOutcome::Resolved(addr.ip()),
            None => {
                tracing::warn!("No A record for {}", hostname);
                ResolveOutcome::Failed
            }
        },
        Err(err) => {
            tracing::warn!("DNS lookup failed for {}: {}", hostname, err);
            ResolveOutcome::Failed
        }
    }
}
