use serde::Deserialize;

/// Main configuration structure for CDP-Atlas
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub discovery: DiscoveryConfig,
    pub credentials: CredentialConfig,
    #[serde(default)]
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Site identification, used in the report header
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Human-readable site name (e.g. "Weaver Manor Campus")
    pub name: String,
}

/// Discovery behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Seed addresses to start discovery from (one or two, preferably core switches)
    pub seeds: Vec<String>,

    /// Maximum number of devices interrogated concurrently
    #[serde(rename = "concurrency-limit")]
    pub concurrency_limit: usize,

    /// Per-connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Total connection attempts per address before it is recorded as unreachable
    #[serde(rename = "max-connect-attempts")]
    pub max_connect_attempts: u32,

    /// Fixed delay between connection attempts, in seconds
    #[serde(rename = "retry-backoff-secs")]
    pub retry_backoff_secs: u64,

    /// Whole-run timeout in seconds; 0 means unlimited
    #[serde(rename = "run-timeout-secs", default)]
    pub run_timeout_secs: u64,

    /// Optional jump host through which device connections are relayed
    #[serde(rename = "jump-host", default)]
    pub jump_host: Option<String>,
}

/// Device credentials, with an optional alternate set tried after a rejection
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialConfig {
    pub username: String,
    pub password: String,

    #[serde(default)]
    pub alternate: Option<CredentialEntry>,
}

/// A single username/password pair
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialEntry {
    pub username: String,
    pub password: String,
}

/// Input configuration for the offline replay mode
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Directory of captured command output, one subdirectory per address
    #[serde(rename = "capture-dir", default)]
    pub capture_dir: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown inventory report
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl DiscoveryConfig {
    /// Connection mode implied by this configuration.
    ///
    /// The crawl algorithm never branches on the mode; it is carried for
    /// executor implementations that need to relay through a bastion.
    pub fn connection_mode(&self) -> crate::executor::ConnectionMode {
        match &self.jump_host {
            Some(host) => crate::executor::ConnectionMode::Tunneled {
                jump_host: host.clone(),
            },
            None => crate::executor::ConnectionMode::Direct,
        }
    }
}

impl CredentialConfig {
    /// The default credential set presented to every device first
    pub fn default_set(&self) -> crate::executor::CredentialSet {
        crate::executor::CredentialSet::new(&self.username, &self.password)
    }

    /// The alternate credential set, if one is configured
    pub fn alternate_set(&self) -> Option<crate::executor::CredentialSet> {
        self.alternate
            .as_ref()
            .map(|entry| crate::executor::CredentialSet::new(&entry.username, &entry.password))
    }
}
