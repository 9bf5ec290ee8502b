//! BFS frontier queue
//!
//! Holds the addresses awaiting interrogation. The frontier is a multiset:
//! duplicate addresses may sit in the queue (deduplication happens at the
//! identity level after connecting, because an address alone cannot be proven
//! redundant). What the frontier does filter is re-dispatch: an address that
//! was already handed to a worker is not enqueued again when rediscovered.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    pending: VecDeque<String>,
    dispatched: HashSet<String>,
}

/// Work queue of addresses awaiting interrogation
#[derive(Debug, Default)]
pub struct FrontierQueue {
    inner: Mutex<Inner>,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an address unconditionally (used for seeds)
    pub fn push(&self, address: &str) {
        self.inner
            .lock()
            .unwrap()
            .pending
            .push_back(address.to_string());
    }

    /// Enqueues a discovered address unless it was already dispatched.
    ///
    /// Returns true if the address was enqueued. Pending duplicates are
    /// allowed; workers collapse them through the visited registry.
    pub fn push_if_undispatched(&self, address: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.dispatched.contains(address) {
            return false;
        }
        inner.pending.push_back(address.to_string());
        true
    }

    /// Drains up to `limit` addresses for one wave, marking each dispatched
    pub fn drain_batch(&self, limit: usize) -> Vec<String> {
        let mut inner = self.inner.lock().unwrap();
        let take = limit.min(inner.pending.len());
        let mut batch = Vec::with_capacity(take);
        for _ in 0..take {
            if let Some(address) = inner.pending.pop_front() {
                inner.dispatched.insert(address.clone());
                batch.push(address);
            }
        }
        batch
    }

    /// Number of addresses still pending
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().pending.is_empty()
    }

    /// Number of addresses handed to workers so far
    pub fn dispatched_count(&self) -> usize {
        self.inner.lock().unwrap().dispatched.len()
    }
}
