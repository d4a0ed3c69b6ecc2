//! Schema creation command

use anyhow::{Context, Result};
use biotracker_core::TrackerConfig;
use clap::Parser;

use biotracker_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DB_URL")]
    pub database_url: Option<String>,
}

/// Create every table and index, then exit
pub async fn run_migrate(args: MigrateArgs, config: TrackerConfig) -> Result<()> {
    let url = args.database_url.unwrap_or(config.database.url);
    tracing::info!(database = %url, "creating tables");

    let pool = create_pool(&url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to create database tables")?;
    pool.close().await;

    println!("Schema up to date: {}", url);
    Ok(())
}
