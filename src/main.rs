//! Prensa main entry point
//!
//! This is the command-line interface for the Prensa news scraper.

use anyhow::Context;
use clap::Parser;
use prensa::config::{builtin_config, load_config_with_hash, Config};
use prensa::output::{print_data_summary, print_report, write_markdown_report};
use prensa::{ExportFormat, Orchestrator};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Prensa: a polite multi-portal news scraper
///
/// Prensa scrapes article listings of the configured news portals, extracts
/// headline, summary, body, date and author of every linked article, and
/// exports the merged result as CSV and JSON.
#[derive(Parser, Debug)]
#[command(name = "prensa")]
#[command(version)]
#[command(about = "A polite multi-portal news scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in Mendoza portals when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long)]
    dry_run: bool,

    /// Only scrape the named portal (repeatable)
    #[arg(long = "portal", value_name = "NAME")]
    portals: Vec<String>,

    /// Only use the first N seed listing pages of each portal
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    max_seeds: Option<u64>,

    /// Override the CSV export path
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Override the JSON export path
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write a markdown run report to PATH
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::info!("No configuration file given, using built-in portals");
            (builtin_config(), None)
        }
    };

    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_scrape(config, config_hash).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("prensa=info,warn"),
            1 => EnvFilter::new("prensa=debug,info"),
            2 => EnvFilter::new("prensa=trace,debug"),
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

/// Applies the command-line filters and paths, then re-validates
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    config.retain_portals(&cli.portals)?;

    if let Some(max) = cli.max_seeds {
        config.limit_seeds(usize::try_from(max).unwrap_or(usize::MAX));
    }
    if let Some(path) = &cli.csv {
        config.output.csv_path = path.display().to_string();
    }
    if let Some(path) = &cli.json {
        config.output.json_path = path.display().to_string();
    }
    if let Some(path) = &cli.report {
        config.output.report_path = Some(path.display().to_string());
    }

    config.validate().context("Invalid configuration")?;
    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    // Building the orchestrator binds every adapter without sending a request
    let orchestrator = Orchestrator::from_config(config)?;

    println!("=== Prensa Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Request delay: {}s", config.scraper.request_delay);
    println!("  Portal delay: {}s", config.scraper.portal_delay);
    println!("  Timeout: {}s", config.scraper.timeout);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  JSON: {}", config.output.json_path);
    if let Some(report) = &config.output.report_path {
        println!("  Report: {}", report);
    }

    println!("\nPortals ({}):", orchestrator.sources().len());
    for source in orchestrator.sources() {
        let pacing = source.pacing();
        println!(
            "  - {} [adapter: {}] ({} seeds, {:.1}s between requests, {}s timeout)",
            source.name(),
            source.adapter().id(),
            source.seeds().len(),
            pacing.request_delay.as_secs_f64(),
            pacing.timeout.as_secs()
        );
        for seed in source.seeds() {
            println!("    * {}", seed);
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start scraping with {} seed URLs",
        orchestrator
            .sources()
            .iter()
            .map(|s| s.seeds().len())
            .sum::<usize>()
    );

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, config_hash: Option<String>) -> anyhow::Result<()> {
    let mut orchestrator = Orchestrator::from_config(&config)?;
    if let Some(hash) = config_hash {
        orchestrator = orchestrator.with_config_hash(hash);
    }

    tracing::info!(
        portals = orchestrator.sources().len(),
        seeds = orchestrator
            .sources()
            .iter()
            .map(|s| s.seeds().len())
            .sum::<usize>(),
        "Starting scrape"
    );

    let report = orchestrator.scrape_all().await;

    for (format, path) in [
        (ExportFormat::Csv, &config.output.csv_path),
        (ExportFormat::Json, &config.output.json_path),
    ] {
        let written = orchestrator
            .export(format, Path::new(path))
            .with_context(|| format!("Failed to export {} to {}", format, path))?;
        if written > 0 {
            println!("✓ {} articles exported to: {}", written, path);
        }
    }

    if let Some(path) = &config.output.report_path {
        write_markdown_report(&report, Path::new(path))
            .with_context(|| format!("Failed to write report to {}", path))?;
        println!("✓ Report written to: {}", path);
    }

    println!();
    print_report(&report);
    print_data_summary(&orchestrator.to_tabular_view(), 5);

    Ok(())
}
