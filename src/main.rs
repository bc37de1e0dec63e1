//! Lemme-Scrape main entry point
//!
//! This is the command-line interface for the Lemme-Scrape site crawler.

use anyhow::Context;
use clap::Parser;
use lemme_scrape::config::{load_config, validate, Config};
use lemme_scrape::crawler::{Crawler, RunContext};
use lemme_scrape::output::ReportWriter;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Lemme-Scrape: a bounded-concurrency site crawler
///
/// Fetches the seed page, prints its title and same-origin links, then
/// fetches every link concurrently and reports each page's title or error.
#[derive(Parser, Debug)]
#[command(name = "lemme-scrape")]
#[command(version)]
#[command(about = "A bounded-concurrency site crawler", long_about = None)]
struct Cli {
    /// Seed URL to start from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Deadline for the whole run, in milliseconds
    #[arg(long, value_name = "MS")]
    run_timeout_ms: Option<u64>,

    /// Deadline for each linked page, in milliseconds
    #[arg(long, value_name = "MS")]
    job_timeout_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let crawler = Crawler::from_config(&config).context("Failed to build HTTP client")?;

    // Ctrl-C cancels the run; in-flight pages still report before the summary
    let token = CancellationToken::new();
    let ctx = RunContext::with_token(token.clone(), config.crawler.run_timeout());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling crawl");
            token.cancel();
        }
    });

    // Title and links print before dispatch, each page as it completes
    let mut report = ReportWriter::new(std::io::stdout());
    let outcome = match crawler.crawl_with(&cli.seed, &ctx, &mut report).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).with_context(|| format!("Error fetching {}", cli.seed));
        }
    };

    report
        .finish(&outcome.report, outcome.elapsed)
        .context("Failed to write report")?;

    Ok(())
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.max_concurrency = workers;
    }
    if let Some(ms) = cli.run_timeout_ms {
        config.crawler.run_timeout_ms = ms;
    }
    if let Some(ms) = cli.job_timeout_ms {
        config.crawler.job_timeout_ms = ms;
    }

    validate(&config).context("Invalid configuration")?;

    tracing::debug!(
        "Workers: {}, run timeout: {:?}, job timeout: {:?}",
        config.crawler.max_concurrency,
        config.crawler.run_timeout(),
        config.crawler.job_timeout()
    );

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lemme_scrape=info,warn"),
            1 => EnvFilter::new("lemme_scrape=debug,info"),
            2 => EnvFilter::new("lemme_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
