//! Read-only access to whitelisted spec tables and datasets
//!
//! Two interchangeable sources sit behind [`SpecSource`]:
//! - [`DatabaseSpecSource`] reflects physical tables named in `spec_tables`
//!   and `spec_datasets`
//! - [`CsvSpecSource`] reads `.csv` files from a fixed directory layout
//!
//! A name outside the whitelist is rejected before any table is read.

pub mod csv_dir;
pub mod database;

use async_trait::async_trait;

pub use crate::db::rows::JsonRow;
pub use csv_dir::CsvSpecSource;
pub use database::DatabaseSpecSource;

/// Spec source error type
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("Table '{0}' not whitelisted")]
    NotWhitelisted(String),

    #[error("Dataset '{0}' not found")]
    DatasetNotFound(String),

    /// A whitelisted table or dataset exists by name but could not be read
    #[error("Error loading table '{name}': {message}")]
    Load { name: String, message: String },

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl SpecError {
    pub(crate) fn load(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Load {
            name: name.to_owned(),
            message: err.to_string(),
        }
    }
}

/// Backend serving `/v1/specs`
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Short name for logs ("database", "csv").
    fn kind(&self) -> &'static str;

    /// Whitelisted table names.
    async fn table_names(&self) -> Result<Vec<String>, SpecError>;

    /// Whitelisted dataset names.
    async fn dataset_names(&self) -> Result<Vec<String>, SpecError>;

    /// Every row of a whitelisted table.
    async fn table_rows(&self, table: &str) -> Result<Vec<JsonRow>, SpecError>;

    /// Every row of a whitelisted dataset.
    async fn dataset_rows(&self, dataset: &str) -> Result<Vec<JsonRow>, SpecError>;

    /// Variable metadata for a dataset. Unknown datasets have no variables.
    async fn dataset_variables(&self, dataset: &str) -> Result<Vec<JsonRow>, SpecError>;
}
