//! Per-address failure bookkeeping
//!
//! Failed addresses land in one of two disjoint sets: authentication
//! failures (every credential set rejected) and connection failures (the
//! retry budget ran out on transport errors). A failed address never blocks
//! the rest of the crawl; the sets are reported alongside the inventory.

use std::collections::BTreeSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Sets {
    auth: BTreeSet<String>,
    connection: BTreeSet<String>,
}

/// Disjoint record of addresses that could not be interrogated
///
/// An address appears in at most one set; the first recording wins. Both
/// sets only ever grow during a run.
#[derive(Debug, Default)]
pub struct FailureLog {
    inner: Mutex<Sets>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an address whose credentials were all rejected.
    ///
    /// Returns false if the address was already recorded (in either set).
    pub fn record_auth_failure(&self, address: &str) -> bool {
        let mut sets = self.inner.lock().unwrap();
        if sets.connection.contains(address) {
            return false;
        }
        sets.auth.insert(address.to_string())
    }

    /// Records an address that stayed unreachable through the retry budget.
    ///
    /// Returns false if the address was already recorded (in either set).
    pub fn record_connection_failure(&self, address: &str) -> bool {
        let mut sets = self.inner.lock().unwrap();
        if sets.auth.contains(address) {
            return false;
        }
        sets.connection.insert(address.to_string())
    }

    /// Addresses with rejected credentials, sorted
    pub fn auth_failures(&self) -> Vec<String> {
        self.inner.lock().unwrap().auth.iter().cloned().collect()
    }

    /// Unreachable addresses, sorted
    pub fn connection_failures(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .connection
            .iter()
            .cloned()
            .collect()
    }

    /// Total failed addresses across both sets
    pub fn len(&self) -> usize {
        let sets = self.inner.lock().unwrap();
        sets.auth.len() + sets.connection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
