//! zkgate CLI — Offline verification and inspection of zkgate proofs.
//!
//! Subcommands: init, verify, inspect.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// zkgate — Policy checks for passport and poll zero-knowledge proofs.
#[derive(Parser, Debug)]
#[command(name = "zkgate", version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format (text, json).
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default verification policy file.
    Init(commands::init::InitArgs),
    /// Verify a proof against a policy.
    Verify(commands::verify::VerifyArgs),
    /// Decode the public signals of a proof.
    Inspect(commands::inspect::InspectArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if cli.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Verify(args) => commands::verify::run(args).await,
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
