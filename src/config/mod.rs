//! Configuration loading and validation
//!
//! Configuration comes from a single TOML file describing the site, the seed
//! addresses and crawl limits, device credentials, and the output paths.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CredentialConfig, CredentialEntry, DiscoveryConfig, InputConfig, OutputConfig,
    SiteConfig,
};
pub use validation::validate;
