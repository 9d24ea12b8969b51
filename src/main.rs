//! Sumi-Lens main entry point
//!
//! This is the command-line interface for the Sumi-Lens page analyzer.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_lens::config::{load_config_with_hash, validate, Config};
use sumi_lens::output::{write_report, ReportFormat};
use tracing_subscriber::EnvFilter;

/// Sumi-Lens: a single-page SEO signal analyzer
///
/// Sumi-Lens fetches one page, extracts technical, content, social and
/// accessibility signals, scores them and lists prioritized findings.
#[derive(Parser, Debug)]
#[command(name = "sumi-lens")]
#[command(version)]
#[command(about = "A single-page SEO signal analyzer", long_about = None)]
struct Cli {
    /// Page to analyze (http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format: json, markdown or text
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Overall run budget in seconds, overrides the config
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    if let Some(secs) = cli.timeout {
        config.analysis.overall_timeout_secs = Some(secs);
        validate(&config).context("Invalid --timeout")?;
    }

    let result = sumi_lens::analyze(&cli.url, &config)
        .await
        .with_context(|| format!("Analysis of {} failed", cli.url))?;

    write_report(&result, cli.format, cli.pretty, cli.output.as_deref())
        .context("Failed to write report")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_lens=info,warn"),
            1 => EnvFilter::new("sumi_lens=debug,info"),
            2 => EnvFilter::new("sumi_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file when given, otherwise the defaults
fn load_configuration(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}
