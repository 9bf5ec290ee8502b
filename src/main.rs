//! CDP-Atlas main entry point
//!
//! Command-line interface for the CDP neighbor topology crawler.

use anyhow::Context;
use cdp_atlas::config::{load_config_with_hash, Config};
use cdp_atlas::crawler::discover;
use cdp_atlas::executor::ReplayExecutor;
use cdp_atlas::output::{generate_markdown_report, print_summary, InventorySummary, ReportMeta};
use cdp_atlas::resolver::resolve_hostnames;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CDP-Atlas: a CDP neighbor topology crawler
///
/// Starting from one or two seed addresses, CDP-Atlas walks the network's
/// neighbor advertisements breadth-first, deduplicates devices by reported
/// identity, and writes a markdown inventory of every device and link it
/// found, plus the addresses it could not interrogate.
#[derive(Parser, Debug)]
#[command(name = "cdp-atlas")]
#[command(version = "1.0.0")]
#[command(about = "A CDP neighbor topology crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without connecting
    #[arg(long)]
    dry_run: bool,

    /// Capture directory for offline replay (overrides [input] capture-dir)
    #[arg(long, value_name = "DIR")]
    capture_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, config_hash, cli.capture_dir).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cdp_atlas=info,warn"),
            1 => EnvFilter::new("cdp_atlas=debug,info"),
            2 => EnvFilter::new("cdp_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== CDP-Atlas Dry Run ===\n");

    println!("Site: {}", config.site.name);

    println!("\nDiscovery:");
    println!("  Seeds: {}", config.discovery.seeds.join(", "));
    println!("  Concurrency limit: {}", config.discovery.concurrency_limit);
    println!(
        "  Connect timeout: {}s",
        config.discovery.connect_timeout_secs
    );
    println!(
        "  Connect attempts: {} (backoff {}s)",
        config.discovery.max_connect_attempts, config.discovery.retry_backoff_secs
    );
    match config.discovery.run_timeout_secs {
        0 => println!("  Run timeout: unlimited"),
        secs => println!("  Run timeout: {}s", secs),
    }
    println!("  Connection mode: {:?}", config.discovery.connection_mode());

    println!("\nCredentials:");
    println!("  Username: {}", config.credentials.username);
    println!(
        "  Alternate set: {}",
        if config.credentials.alternate.is_some() {
            "configured"
        } else {
            "none"
        }
    );

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start discovery from {} seed address(es)",
        config.discovery.seeds.len()
    );
}

/// Handles the crawl: discover, resolve, report
async fn handle_crawl(
    config: Config,
    config_hash: String,
    capture_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let capture_dir = capture_dir
        .or_else(|| config.input.capture_dir.as_ref().map(PathBuf::from))
        .context(
            "no capture directory configured; pass --capture-dir or set [input] capture-dir \
             (live transports plug in through the CommandExecutor trait)",
        )?;

    tracing::info!("Replaying captures from {}", capture_dir.display());
    let executor = ReplayExecutor::from_dir(&capture_dir)
        .with_context(|| format!("failed to load captures from {}", capture_dir.display()))?;

    let report = discover(&config, Arc::new(executor)).await?;

    tracing::info!("Resolving {} discovered hostname(s)", report.hostnames.len());
    let dns = resolve_hostnames(&report.hostnames).await;

    let summary = InventorySummary::from_report(&report);
    print_summary(&summary);

    let meta = ReportMeta {
        site_name: config.site.name.clone(),
        seeds: config.discovery.seeds.clone(),
        config_hash,
        generated_at: chrono::Local::now(),
    };
    generate_markdown_report(&report, &dns, &meta, Path::new(&config.output.report_path))?;
    println!("\n✓ Inventory written to: {}", config.output.report_path);

    Ok(())
}
