//! Command execution boundary
//!
//! The crawl algorithm talks to devices exclusively through the
//! [`CommandExecutor`] trait: give it an address, a command, and a credential
//! set, get back raw output or a classified error. Everything transport-level
//! (session setup, jump-host relaying, cipher negotiation) lives behind the
//! trait; the crawler only depends on the error classification:
//! - [`ExecError::AuthRejected`] drives credential fallback, never retries
//! - [`ExecError::Timeout`] / [`ExecError::Channel`] drive the retry budget
//!
//! The crate ships one implementation, [`ReplayExecutor`], which serves
//! captured command output. Production transports implement the same trait
//! out of tree.

mod replay;

pub use replay::{DeviceScript, ReplayExecutor, TransportFault};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// A username/password pair presented to a device
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub username: String,
    pub password: String,
}

impl CredentialSet {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

// Keep passwords out of logs and debug dumps
impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How connections reach target devices
///
/// Mode selection is a configuration concern; the crawl loop never branches
/// on it. Executor implementations that support tunneling open the jump-host
/// session once and relay every device connection through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Devices are reached directly
    Direct,
    /// Devices are reached through a shared jump-host session
    Tunneled { jump_host: String },
}

/// Classified command execution failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("authentication rejected by {address}")]
    AuthRejected { address: String },

    #[error("connection to {address} timed out")]
    Timeout { address: String },

    #[error("channel failure talking to {address}: {message}")]
    Channel { address: String, message: String },
}

impl ExecError {
    /// The address the failure occurred against
    pub fn address(&self) -> &str {
        match self {
            Self::AuthRejected { address } => address,
            Self::Timeout { address } => address,
            Self::Channel { address, .. } => address,
        }
    }

    /// Whether this is an authentication rejection (drives credential fallback)
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRejected { .. })
    }

    /// Whether another attempt against the same address can succeed.
    ///
    /// Transport-level failures are transient; a rejected credential set will
    /// be rejected again.
    pub fn is_retryable(&self) -> bool {
        !self.is_auth()
    }
}

/// Uniform command execution contract
///
/// Implementations must classify every failure into one [`ExecError`]
/// variant; the crawler's retry and fallback policy is built entirely on
/// that classification.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Executes `command` on the device at `address` using `credentials`,
    /// returning the raw text output
    async fn execute(
        &self,
        address: &str,
        command: &str,
        credentials: &CredentialSet,
    ) -> Result<String, ExecError>;
}
