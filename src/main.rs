//! Shelter-Scraper main entry point
//!
//! This is the command-line interface for the shelter photo gallery downloader.

use anyhow::Context;
use clap::Parser;
use shelter_scraper::config::{load_config, validate_run_config, Config, RunConfig};
use shelter_scraper::crawler::{scrape, SiteAdapter};
use shelter_scraper::output::print_summary;
use shelter_scraper::sites::{Czestochowa, SiteKind, Warszawa, Wroclaw};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelter-Scraper: downloads animal photo galleries from shelter websites
///
/// Walks a shelter's paginated list of animals, visits every profile and
/// saves its photos into one folder per animal.
#[derive(Parser, Debug)]
#[command(name = "shelter-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Downloads animal photo galleries from shelter websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// First list page to scan (overrides the config file)
    #[arg(long)]
    start_page: Option<u32>,

    /// Last list page to scan (overrides the config file)
    #[arg(long)]
    end_page: Option<u32>,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let run = apply_overrides(&config, &cli);
    validate_run_config(&run).context("Invalid command-line overrides")?;

    if cli.dry_run {
        handle_dry_run(config.site, &run);
        return Ok(());
    }

    match config.site {
        SiteKind::Wroclaw => handle_scrape(run, Wroclaw).await,
        SiteKind::Warszawa => handle_scrape(run, Warszawa).await,
        SiteKind::Czestochowa => handle_scrape(run, Czestochowa).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelter_scraper=info,warn"),
            1 => EnvFilter::new("shelter_scraper=debug,info"),
            2 => EnvFilter::new("shelter_scraper=trace,debug"),
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

/// Resolves the run configuration and applies command-line overrides
fn apply_overrides(config: &Config, cli: &Cli) -> RunConfig {
    let mut run = config.run_config();

    if let Some(start_page) = cli.start_page {
        run.start_page = start_page;
    }
    if let Some(end_page) = cli.end_page {
        run.end_page = end_page;
    }
    if let Some(output_dir) = &cli.output_dir {
        run.output_dir = output_dir.clone();
    }

    run
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(site: SiteKind, run: &RunConfig) {
    println!("=== Shelter-Scraper Dry Run ===\n");

    println!("Site: {}", site);
    println!("  Base URL: {}", run.base_url);
    println!("  List pages: {}-{}", run.start_page, run.end_page);
    println!("  Timeout: {}s", run.timeout.as_secs());
    println!("  Output directory: {}", run.output_dir.display());

    if !run.headers.is_empty() {
        println!("\nExtra headers ({}):", run.headers.len());
        for (name, value) in &run.headers {
            println!("  {}: {}", name, value);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape<A: SiteAdapter>(run: RunConfig, adapter: A) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping {} into {}",
        adapter.name(),
        run.output_dir.display()
    );

    let summary = scrape(run, adapter).await.context("Scrape could not start")?;
    print_summary(&summary);

    Ok(())
}
