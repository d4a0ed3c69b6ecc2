use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "BIOTRACKER_CONFIG";

/// Config file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "biotracker.toml";

static VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("invalid variable regex"));

/// Centralized configuration for the tracker API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub server: HttpConfig,
    pub database: DatabaseConfig,
    pub specs: SpecsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: SocketAddr,
    /// Any origin may call the API. Off means localhost origins only.
    pub cors_permissive: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_permissive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./app.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Where `/v1/specs` reads its whitelisted tables from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecSourceKind {
    #[default]
    Database,
    Csv,
}

impl SpecSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for SpecSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecSourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            "csv" => Ok(Self::Csv),
            other => Err(ConfigError::invalid_value(
                "specs.source",
                other,
                "expected 'database' or 'csv'",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecsConfig {
    pub source: SpecSourceKind,
    pub csv_dir: PathBuf,
}

impl Default for SpecsConfig {
    fn default() -> Self {
        Self {
            source: SpecSourceKind::Database,
            csv_dir: PathBuf::from("./data/specs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Resolve which config file to read.
    ///
    /// An explicit path wins, then `$BIOTRACKER_CONFIG`, then
    /// `./biotracker.toml` when it exists. `None` means defaults only.
    pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load defaults, then the config file (if any), then environment overrides.
    ///
    /// A path that was asked for explicitly must exist; the implicit
    /// `./biotracker.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::config_path(explicit) {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                tracing::debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production) and expand `${VAR}` references.
    ///
    /// `DB_URL` keeps the name the tracker has always been deployed with.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DB_URL").filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        if let Some(bind) = lookup("BIOTRACKER_BIND").filter(|v| !v.is_empty()) {
            self.server.bind = bind.parse().map_err(|_| {
                ConfigError::invalid_value("server.bind", bind.as_str(), "not a socket address")
            })?;
        }
        if let Some(source) = lookup("BIOTRACKER_SPECS_SOURCE").filter(|v| !v.is_empty()) {
            self.specs.source = source.parse()?;
        }
        if let Some(dir) = lookup("BIOTRACKER_SPECS_CSV_DIR").filter(|v| !v.is_empty()) {
            self.specs.csv_dir = PathBuf::from(dir);
        }

        self.database.url = expand_string(&self.database.url, &lookup);
        let csv_dir = expand_string(&self.specs.csv_dir.display().to_string(), &lookup);
        self.specs.csv_dir = PathBuf::from(csv_dir);

        self.validate()
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::invalid_value("database.url", "", "must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid_value(
                "database.max_connections",
                "0",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Expand `${VAR}` references; unknown variables expand to the empty string.
fn expand_string<F>(s: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    VAR_RE
        .replace_all(s, |caps: &regex::Captures<'_>| lookup(&caps[1]).unwrap_or_default())
        .into_owned()
}
