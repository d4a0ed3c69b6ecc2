//! Tracing setup for the biotracker binary
//!
//! Usage:
//!   biotracker --debug serve              # Debug logging to console
//!   RUST_LOG=biotracker_server=debug ...  # Fine-grained log control
//!
//! `RUST_LOG` wins over both the configured level and `--debug`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Force debug level when RUST_LOG is unset
    pub debug: bool,
    /// Filter used when RUST_LOG is unset (from `[logging] level`)
    pub level: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: "info".to_string(),
        }
    }
}

impl TracingConfig {
    fn default_filter(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.level
        }
    }
}

/// Build the filter: RUST_LOG when set, else the configured default.
fn build_filter(config: &TracingConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| anyhow!("invalid RUST_LOG '{}': {}", directives, e)),
        None => EnvFilter::try_new(config.default_filter())
            .map_err(|e| anyhow!("invalid log level '{}': {}", config.default_filter(), e)),
    }
}

/// Initialize console tracing with the compact formatter
pub fn init(config: &TracingConfig) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(config, rust_log.as_deref())?;
    install(filter, config.debug)
}

/// Initialize with the built-in level, ignoring RUST_LOG and `[logging]`.
pub fn init_fallback(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    install(EnvFilter::new(level), debug)
}

fn install(filter: EnvFilter, debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
