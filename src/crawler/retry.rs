//! Retry policy for per-address interrogation
//!
//! One policy object owns the attempt budget, the fixed backoff, and the
//! retryable-error predicate; the worker loop applies it uniformly instead of
//! growing an ad-hoc loop per call site.

use crate::executor::ExecError;
use std::time::Duration;

/// Classifies errors into retryable (transient transport trouble) and
/// terminal (another attempt cannot change the outcome)
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ExecError {
    fn is_retryable(&self) -> bool {
        ExecError::is_retryable(self)
    }
}

/// Fixed-budget, fixed-backoff retry policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Whether the error from attempt number `attempt` (1-based) warrants
    /// another attempt
    pub fn should_retry<E: Retryable>(&self, attempt: u32, error: &E) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }

    /// Waits out the configured backoff
    pub async fn pause(&self) {
        if !self.backoff.is_zero() {
            tokio::time::sleep(self.backoff).await;
        }
    }
}
