//! Report generation
//!
//! Turns a discovery report into the persisted audit artifact: summary
//! statistics for the console and a markdown inventory for the record.

mod markdown;
mod stats;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use stats::{print_summary, InventorySummary};

use chrono::{DateTime, Local};
use thiserror::Error;

/// Report generation errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for report operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Run metadata rendered into the report header
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub site_name: String,
    pub seeds: Vec<String>,
    pub config_hash: String,
    pub generated_at: DateTime<Local>,
}
