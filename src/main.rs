//! Screenwright
//!
//! Metadata-driven screen interpreter for staffing CRM/ATS applications.
//!
//! This is the command-line entry point; all work happens in `screenwright_cli`.

use clap::Parser;
use screenwright_cli::Cli;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let cli = Cli::parse();

    // SCREENWRIGHT_LOG overrides --log-level
    let filter = EnvFilter::try_from_env("SCREENWRIGHT_LOG").unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = screenwright_cli::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
