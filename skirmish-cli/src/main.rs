//! Skirmish CLI - Command-line interface
//!
//! Commands:
//! - inspect: Print the action space derived from a snapshot
//! - replay: Feed scripted input through a client session
//! - serve: Start the render bridge
//! - locate: Convert a pixel position to a hex

mod inspect;
mod locate;
mod replay;
mod server;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skirmish_core::ClientConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Hex-grid tactical client toolkit")]
struct Cli {
    /// Client configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the action space for a snapshot
    Inspect(inspect::InspectArgs),
    /// Replay scripted input and print submitted responses
    Replay(replay::ReplayArgs),
    /// Start the render bridge server
    Serve(server::ServerArgs),
    /// Convert a pixel position to a hex coordinate
    Locate(locate::LocateArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect(args) => inspect::run(args),
        Commands::Replay(args) => replay::run(args),
        Commands::Serve(args) => server::run(args, &config),
        Commands::Locate(args) => locate::run(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    match path {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ClientConfig::default()),
    }
}
