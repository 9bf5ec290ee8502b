//! CDP-Atlas: a CDP neighbor topology crawler
//!
//! This crate implements a breadth-first, concurrency-bounded crawler that walks
//! a network of switches through their CDP neighbor advertisements, starting from
//! one or two seed addresses, and produces a deduplicated inventory of devices
//! and adjacency links plus the addresses that could not be interrogated.

pub mod config;
pub mod crawler;
pub mod device;
pub mod executor;
pub mod facts;
pub mod output;
pub mod resolver;
pub mod state;

use thiserror::Error;

/// Main error type for CDP-Atlas operations
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No seed addresses to crawl")]
    NoSeeds,

    #[error("Command execution error: {0}")]
    Exec(#[from] executor::ExecError),

    #[error("Fact extraction error: {0}")]
    Parse(#[from] ParseError),

    #[error("Report error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors produced while extracting facts from raw command output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Missing '{field}' in `{command}` output")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },

    #[error("Unrecognized `{command}` output: {message}")]
    UnrecognizedOutput {
        command: &'static str,
        message: String,
    },
}

/// Result type alias for CDP-Atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fact extraction
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{discover, DiscoveryEngine, DiscoveryReport};
pub use device::{normalize_hostname, DeviceIdentity, NeighborEdge};
pub use executor::{CommandExecutor, ConnectionMode, CredentialSet, ExecError};
