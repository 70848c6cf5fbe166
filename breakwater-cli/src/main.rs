//! Breakwater CLI - Command-line interface
//!
//! Provides command-line access to the media gateway.

mod commands;

use breakwater_core::tracing_setup::{CliLogLevel, init_tracing};
use clap::Parser;

#[derive(Parser)]
#[command(name = "breakwater")]
#[command(about = "A paywalled media delivery gateway")]
struct Cli {
    /// Console log level
    #[arg(long, default_value = "info")]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), None)?;

    if let Err(e) = commands::handle_command(cli.command).await {
        tracing::error!("{e}");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
