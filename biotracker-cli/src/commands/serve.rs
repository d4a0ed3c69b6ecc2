//! HTTP server command

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use biotracker_core::{SpecSourceKind, TrackerConfig};
use clap::Parser;

use biotracker_server::db::{create_pool_with_options, migrations};
use biotracker_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow any CORS origin; `false` restricts to localhost
    #[arg(long, value_name = "BOOL")]
    pub cors_permissive: Option<bool>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DB_URL")]
    pub database_url: Option<String>,

    /// Where spec tables come from: database or csv
    #[arg(long, value_name = "SOURCE")]
    pub specs_source: Option<SpecSourceKind>,

    /// Root of the CSV spec layout (tables/, datasets/, metadata.csv)
    #[arg(long, value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply(self, config: &mut TrackerConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(permissive) = self.cors_permissive {
            config.server.cors_permissive = permissive;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(source) = self.specs_source {
            config.specs.source = source;
        }
        if let Some(dir) = self.csv_dir {
            config.specs.csv_dir = dir;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: TrackerConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.url,
        specs = %config.specs.source,
        "starting biotracker server"
    );

    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to create database tables")?;

    let state = AppState::from_config(pool, &config.specs);

    run_server(state, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs::parse_from([
            "serve",
            "--bind",
            "0.0.0.0:9100",
            "--cors-permissive",
            "false",
            "--specs-source",
            "csv",
            "--csv-dir",
            "/srv/specs",
        ]);
        let mut config = TrackerConfig::default();
        let url = config.database.url.clone();
        args.apply(&mut config);

        assert_eq!(config.server.bind.port(), 9100);
        assert!(!config.server.cors_permissive);
        assert_eq!(config.specs.source, SpecSourceKind::Csv);
        assert_eq!(config.specs.csv_dir, PathBuf::from("/srv/specs"));
        if std::env::var("DB_URL").is_err() {
            assert_eq!(config.database.url, url);
        }
    }
}
