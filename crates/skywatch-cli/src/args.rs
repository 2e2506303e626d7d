use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "skywatch",
    version,
    about = "Cloud account watchdog: evaluates inventories against a rule policy and emits a report"
)]
pub struct Args {
    /// Path to the account snapshot (JSON export) to evaluate
    pub snapshot: PathBuf,

    /// Configuration file
    #[arg(short, long, default_value = "skywatch.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "html")]
    pub format: OutputFormat,

    /// Report output file
    #[arg(short, long, default_value = "report.html")]
    pub output: PathBuf,

    /// Print the report to stdout instead of writing a file
    #[arg(short = 'n', long)]
    pub no_output: bool,

    /// Send the report to the configured receivers
    #[arg(long)]
    pub email: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}
