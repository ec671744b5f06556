//! Sheet Insights CLI
//!
//! Chunked descriptive statistics and reports for large delimited files.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use sheet_insights_cli::commands::{AnalyzeCommand, MergeCommand};
use sheet_insights_config::{InsightsConfig, ObservabilityConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "sheet-insights",
    version,
    about = "Chunked statistics and reports for large spreadsheets",
    long_about = "Reads delimited files in bounded chunks and merges per-chunk\n\
                  statistics into whole-file summaries and a text report.\n\n\
                  Configuration is layered: defaults, an optional YAML file,\n\
                  then SHEET_INSIGHTS_* environment variables."
)]
struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file"
    )]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    /// JSON logs
    #[arg(long, global = true, help = "Emit logs as JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a delimited file chunk by chunk
    #[command(name = "analyze", about = "Analyze a CSV or other delimited file")]
    Analyze(AnalyzeCommand),

    /// Merge chunk statistics computed elsewhere
    #[command(name = "merge", about = "Merge chunk statistics from JSON lines")]
    Merge(MergeCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        InsightsConfig::load(cli.config.clone()).context("failed to load configuration")?;
    if cli.json_logs {
        config.observability.json_logging = true;
    }
    init_tracing(&config.observability, cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Analyze(command) => command
            .execute(config, &mut out)
            .with_context(|| format!("could not analyze {}", command.path.display()))?,
        Commands::Merge(command) => command
            .execute(config, &mut out)
            .with_context(|| format!("could not merge {}", command.input.display()))?,
    }
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(observability: &ObservabilityConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("processor=debug,sheet_insights_cli=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&observability.log_level))
    };

    let json = observability.json_logging;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
        }))
        .init();
}
