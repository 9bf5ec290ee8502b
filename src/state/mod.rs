//! Shared crawl state
//!
//! The registries mutated by concurrent discovery workers. Every mutation is
//! a single atomic operation behind its own lock; no lock is ever held across
//! a network call.

mod errors;
mod visited;

pub use errors::FailureLog;
pub use visited::VisitedRegistry;
