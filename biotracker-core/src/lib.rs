//! biotracker-core: configuration and shared error types
//!
//! The server and CLI crates both read their settings through
//! [`TrackerConfig`], so the TOML layout and environment overrides
//! live in one place.

pub mod config;
pub mod error;

pub use config::{DatabaseConfig, HttpConfig, LoggingConfig, SpecSourceKind, SpecsConfig, TrackerConfig};
pub use error::{ConfigError, Result};
