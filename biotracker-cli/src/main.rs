//! biotracker CLI - biometrics deliverable tracker API
//!
//! - `serve`: run the HTTP API (creates missing tables first)
//! - `migrate`: create tables and indexes, then exit
//! - `config`: inspect the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use biotracker_core::TrackerConfig;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "biotracker",
    author,
    version,
    about = "HTTP API for biometrics deliverables, program QC, personnel and TOC tracking"
)]
struct Cli {
    /// Config file (default: $BIOTRACKER_CONFIG, then ./biotracker.toml)
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create database tables and indexes
    Migrate(commands::migrate::MigrateArgs),
    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = TrackerConfig::load(cli.config.as_deref()).context("Failed to load configuration");
    let tracing_config = TracingConfig {
        debug: cli.debug,
        level: config
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|_| TracingConfig::default().level),
    };
    if let Err(err) = tracing_setup::init(&tracing_config) {
        eprintln!("warning: {:#}; falling back to default logging", err);
        if let Err(err) = tracing_setup::init_fallback(cli.debug) {
            eprintln!("warning: logging disabled: {:#}", err);
        }
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config?).await?,
        Commands::Migrate(args) => commands::run_migrate(args, config?).await?,
        Commands::Config(args) => commands::run_config(args, cli.config.as_deref(), config)?,
    }
    Ok(())
}
