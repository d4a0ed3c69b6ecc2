//! Configuration inspection command

use std::path::Path;

use anyhow::Result;
use biotracker_core::TrackerConfig;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML (file + environment)
    Show,
    /// Print which config file would be loaded
    Path,
}

/// `config` works from the load result so `config path` still answers
/// when the file itself is broken.
pub fn run_config(
    args: ConfigArgs,
    explicit: Option<&Path>,
    loaded: Result<TrackerConfig>,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = loaded?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigCommand::Path => match TrackerConfig::config_path(explicit) {
            Some(path) => println!("{}", path.display()),
            None => println!("(none, using built-in defaults)"),
        },
    }
    Ok(())
}
