//! Markdown inventory report generation
//!
//! Renders the audit artifact: a run header, the neighbor inventory table,
//! the resolved-DNS table, and the failed-address sections.

use crate::crawler::DiscoveryReport;
use crate::output::stats::InventorySummary;
use crate::output::{OutputResult, ReportMeta};
use crate::resolver::ResolveOutcome;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates the markdown report and writes it to `output_path`
pub fn generate_markdown_report(
    report: &DiscoveryReport,
    dns: &BTreeMap<String, ResolveOutcome>,
    meta: &ReportMeta,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(report, dns, meta);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats the full report as markdown
pub fn format_markdown_report(
    report: &DiscoveryReport,
    dns: &BTreeMap<String, ResolveOutcome>,
    meta: &ReportMeta,
) -> String {
    let summary = InventorySummary::from_report(report);
    let mut md = String::new();

    md.push_str("# CDP Network Audit\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Site**: {}\n", meta.site_name));
    md.push_str(&format!(
        "- **Date**: {}\n",
        meta.generated_at.format("%d %B %Y %H:%M")
    ));
    for (index, seed) in meta.seeds.iter().enumerate() {
        md.push_str(&format!("- **Seed {}**: {}\n", index + 1, seed));
    }
    md.push_str(&format!("- **Config Hash**: {}\n\n", meta.config_hash));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Devices Interrogated**: {}\n", summary.devices));
    md.push_str(&format!("- **Neighbor Edges**: {}\n", summary.edges));
    md.push_str(&format!("- **Dispatch Waves**: {}\n", summary.waves));
    md.push_str(&format!(
        "- **Success Rate**: {:.1}%\n\n",
        summary.success_rate()
    ));

    md.push_str("## Neighbor Inventory\n\n");
    if report.edges.is_empty() {
        md.push_str("No neighbor advertisements were recorded.\n\n");
    } else {
        md.push_str(
            "| Local Host | Local IP | Local Port | Local Serial | Local Uptime \
             | Destination Host | Remote Port | Management IP | Platform \
             | Software Version | Capabilities |\n",
        );
        md.push_str(
            "|------------|----------|------------|--------------|--------------\
             |------------------|-------------|---------------|----------\
             |------------------|--------------|\n",
        );
        for edge in &report.edges {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                cell(&edge.local_host),
                cell(&edge.local_ip),
                cell(&edge.local_port),
                cell(&edge.local_serial),
                cell(&edge.local_uptime),
                cell(&edge.destination_host),
                cell(&edge.remote_port),
                cell(&edge.management_ip),
                cell(&edge.platform),
                cell(&edge.software_version),
                cell(&edge.capabilities),
            ));
        }
        md.push('\n');
    }

    md.push_str("## DNS Resolution\n\n");
    if dns.is_empty() {
        md.push_str("No hostnames to resolve.\n\n");
    } else {
        md.push_str("| Hostname | IP Address |\n");
        md.push_str("|----------|------------|\n");
        for (hostname, outcome) in dns {
            md.push_str(&format!("| {} | {} |\n", cell(hostname), outcome));
        }
        md.push('\n');
    }

    if !report.auth_failures.is_empty() {
        md.push_str(&format!(
            "## Authentication Failures ({})\n\n",
            report.auth_failures.len()
        ));
        for address in &report.auth_failures {
            md.push_str(&format!("- {}\n", address));
        }
        md.push('\n');
    }

    if !report.connection_failures.is_empty() {
        md.push_str(&format!(
            "## Connection Failures ({})\n\n",
            report.connection_failures.len()
        ));
        for address in &report.connection_failures {
            md.push_str(&format!("- {}\n", address));
        }
        md.push('\n');
    }

    if report.parse_failures > 0 {
        md.push_str(&format!(
            "## Unparseable Output\n\n{} address(es) returned output that did not \
             match the expected command format.\n",
            report.parse_failures
        ));
    }

    md
}

/// Escapes a value for use inside a markdown table cell
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
