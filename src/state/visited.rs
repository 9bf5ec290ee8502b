//! Visited-device registry
//!
//! The registry is the single synchronization point that keeps a meshed
//! topology from being expanded twice: however many addresses lead to a
//! device, exactly one worker wins the claim on its identity and interrogates
//! it for neighbors.

use std::collections::HashSet;
use std::sync::Mutex;

/// Monotone set of interrogated device identities
///
/// Identities are normalized hostnames (see
/// [`normalize_hostname`](crate::normalize_hostname)). Entries are never
/// removed during a run.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    inner: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims an identity.
    ///
    /// Returns true iff the identity was not already claimed; the caller that
    /// sees true is the one (and only) worker allowed to interrogate the
    /// device for neighbors.
    pub fn claim(&self, hostname: &str) -> bool {
        self.inner.lock().unwrap().insert(hostname.to_string())
    }

    /// Whether an identity has been claimed
    pub fn contains(&self, hostname: &str) -> bool {
        self.inner.lock().unwrap().contains(hostname)
    }

    /// Number of claimed identities
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    /// All claimed identities, sorted
    pub fn hostnames(&self) -> Vec<String> {
        let mut hostnames: Vec<String> = self.inner.lock().unwrap().iter().cloned().collect();
        hostnames.sort();
        hostnames
    }
}
