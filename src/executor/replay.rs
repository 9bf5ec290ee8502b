//! Capture-replay command executor
//!
//! Serves previously captured command output instead of opening live device
//! sessions. This backs the integration tests (scripted topologies, scripted
//! faults, call accounting) and the CLI's offline mode, which replays a
//! directory of captures through the full discovery pipeline.
//!
//! Capture directory layout: one subdirectory per address, one `.txt` file
//! per command with spaces replaced by underscores:
//!
//! ```text
//! captures/
//!   10.0.0.1/
//!     show_version.txt
//!     show_cdp_neighbors_detail.txt
//! ```

use crate::executor::{CommandExecutor, CredentialSet, ExecError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Transport fault kinds a device script can inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFault {
    Timeout,
    Channel,
}

impl TransportFault {
    fn to_error(self, address: &str) -> ExecError {
        match self {
            Self::Timeout => ExecError::Timeout {
                address: address.to_string(),
            },
            Self::Channel => ExecError::Channel {
                address: address.to_string(),
                message: "scripted channel failure".to_string(),
            },
        }
    }
}

/// Scripted behavior for a single address
#[derive(Debug)]
pub struct DeviceScript {
    outputs: HashMap<String, String>,
    required_user: Option<String>,
    fault: Option<TransportFault>,
    fault_budget: AtomicUsize,
}

impl DeviceScript {
    /// A device that accepts any credentials and serves the outputs added
    /// with [`DeviceScript::output`]
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
            required_user: None,
            fault: None,
            fault_budget: AtomicUsize::new(0),
        }
    }

    /// Adds captured output for a command
    pub fn output(mut self, command: &str, raw: &str) -> Self {
        self.outputs.insert(command.to_string(), raw.to_string());
        self
    }

    /// Only sessions presenting this username are accepted; all others get
    /// an authentication rejection
    pub fn require_user(mut self, username: &str) -> Self {
        self.required_user = Some(username.to_string());
        self
    }

    /// The first `attempts` executions fail with the given fault, later
    /// ones succeed
    pub fn fail_first(mut self, attempts: usize, fault: TransportFault) -> Self {
        self.fault = Some(fault);
        self.fault_budget = AtomicUsize::new(attempts);
        self
    }

    /// Every execution fails with the given fault
    pub fn always_fail(mut self, fault: TransportFault) -> Self {
        self.fault = Some(fault);
        self.fault_budget = AtomicUsize::new(usize::MAX);
        self
    }

    /// Consumes one unit of the fault budget; true if a fault should fire
    fn take_fault(&self) -> bool {
        if self.fault.is_none() {
            return false;
        }
        self.fault_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                if remaining == usize::MAX {
                    Some(remaining)
                } else if remaining > 0 {
                    Some(remaining - 1)
                } else {
                    None
                }
            })
            .is_ok()
    }
}

impl Default for DeviceScript {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture-backed [`CommandExecutor`]
///
/// Unknown addresses behave like unreachable devices (timeout). Execution
/// counts per address and the high-water mark of concurrent executions are
/// tracked so tests can assert interrogation counts and the concurrency
/// bound.
pub struct ReplayExecutor {
    devices: HashMap<String, DeviceScript>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<HashMap<String, usize>>,
}

impl ReplayExecutor {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// An executor that sleeps for `latency` per command, making concurrent
    /// executions observable
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            devices: HashMap::new(),
            latency,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Registers the script served for an address
    pub fn add_device(&mut self, address: &str, script: DeviceScript) {
        self.devices.insert(address.to_string(), script);
    }

    /// Loads a capture directory (one subdirectory per address, one `.txt`
    /// file per command, underscores for spaces in the command name)
    pub fn from_dir(path: &Path) -> std::io::Result<Self> {
        let mut executor = Self::new();

        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let address = entry.file_name().to_string_lossy().to_string();
            let mut script = DeviceScript::new();

            for capture in std::fs::read_dir(entry.path())? {
                let capture = capture?;
                let capture_path = capture.path();
                if capture_path.extension().and_then(|e| e.to_str()) != Some("txt") {
                    continue;
                }

                let command = match capture_path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem.replace('_', " "),
                    None => continue,
                };
                let raw = std::fs::read_to_string(&capture_path)?;
                script = script.output(&command, &raw);
            }

            executor.add_device(&address, script);
        }

        Ok(executor)
    }

    /// Number of commands executed against an address
    pub fn calls_for(&self, address: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    /// Total commands executed across all addresses
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// High-water mark of concurrent executions
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn serve(
        &self,
        address: &str,
        command: &str,
        credentials: &CredentialSet,
    ) -> Result<String, ExecError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_insert(0) += 1;

        let script = match self.devices.get(address) {
            Some(script) => script,
            None => {
                return Err(ExecError::Timeout {
                    address: address.to_string(),
                })
            }
        };

        if script.take_fault() {
            // fault is always Some when take_fault fires
            let fault = script.fault.unwrap_or(TransportFault::Channel);
            return Err(fault.to_error(address));
        }

        if let Some(required) = &script.required_user {
            if credentials.username != *required {
                return Err(ExecError::AuthRejected {
                    address: address.to_string(),
                });
            }
        }

        match script.outputs.get(command) {
            Some(raw) => Ok(raw.clone()),
            None => Err(ExecError::Channel {
                address: address.to_string(),
                message: format!("no captured output for `{}`", command),
            }),
        }
    }
}

impl Default for ReplayExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ReplayExecutor {
    async fn execute(
        &self,
        address: &str,
        command: &str,
        credentials: &CredentialSet,
    ) -> Result<String, ExecError> {
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = self.serve(address, command, credentials);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
