//! Inventory summary statistics
//!
//! Aggregates a discovery report into the counts shown on the console and in
//! the report header.

use crate::crawler::DiscoveryReport;

/// Aggregated counts for one discovery run
#[derive(Debug, Clone)]
pub struct InventorySummary {
    /// Distinct devices interrogated
    pub devices: usize,

    /// Neighbor edges recorded
    pub edges: usize,

    /// Edges pointing at further crawlable switches
    pub crawl_candidates: usize,

    /// Addresses with rejected credentials
    pub auth_failures: usize,

    /// Addresses that stayed unreachable
    pub connection_failures: usize,

    /// Addresses with unparseable output
    pub parse_failures: usize,

    /// Dispatch waves the crawl ran
    pub waves: usize,
}

impl InventorySummary {
    /// Builds a summary from a discovery report
    pub fn from_report(report: &DiscoveryReport) -> Self {
        Self {
            devices: report.device_count(),
            edges: report.edges.len(),
            crawl_candidates: report
                .edges
                .iter()
                .filter(|edge| edge.is_crawl_candidate())
                .count(),
            auth_failures: report.auth_failures.len(),
            connection_failures: report.connection_failures.len(),
            parse_failures: report.parse_failures,
            waves: report.waves,
        }
    }

    /// Fraction of attempted devices that were successfully interrogated,
    /// as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.devices + self.auth_failures + self.connection_failures;
        if attempted == 0 {
            return 0.0;
        }
        (self.devices as f64 / attempted as f64) * 100.0
    }
}

/// Prints a summary to stdout in a formatted manner
pub fn print_summary(summary: &InventorySummary) {
    println!("=== Discovery Summary ===\n");

    println!("Overview:");
    println!("  Devices interrogated: {}", summary.devices);
    println!("  Neighbor edges: {}", summary.edges);
    println!("  Crawlable switch edges: {}", summary.crawl_candidates);
    println!("  Dispatch waves: {}", summary.waves);
    println!();

    if summary.auth_failures + summary.connection_failures + summary.parse_failures > 0 {
        println!("Failures:");
        println!("  Authentication: {}", summary.auth_failures);
        println!("  Connection: {}", summary.connection_failures);
        println!("  Unparseable output: {}", summary.parse_failures);
        println!();
    }

    println!(
        "Success rate: {:.1}% ({} / {} addresses interrogated)",
        summary.success_rate(),
        summary.devices,
        summary.devices + summary.auth_failures + summary.connection_failures
    );
}
