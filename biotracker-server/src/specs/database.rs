//! Spec tables reflected from the tracker database

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{JsonRow, SpecError, SpecSource};
use crate::db::rows::row_to_json;

/// Whitelist from `spec_tables` / `spec_datasets`, rows by `SELECT *`
#[derive(Clone)]
pub struct DatabaseSpecSource {
    pool: SqlitePool,
}

impl DatabaseSpecSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn is_whitelisted_table(&self, table: &str) -> Result<bool, SpecError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM spec_tables WHERE table_name = ?)")
                .bind(table)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn is_whitelisted_dataset(&self, dataset: &str) -> Result<bool, SpecError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM spec_datasets WHERE dataset_name = ?)")
                .bind(dataset)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Read every row of a table that has already passed the whitelist.
    async fn reflect(&self, name: &str) -> Result<Vec<JsonRow>, SpecError> {
        let sql = format!("SELECT * FROM {}", quote_identifier(name));
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SpecError::load(name, e))?;

        rows.iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SpecError::load(name, e))
    }
}

/// Quote an identifier for SQLite, doubling embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl SpecSource for DatabaseSpecSource {
    fn kind(&self) -> &'static str {
        "database"
    }

    async fn table_names(&self) -> Result<Vec<String>, SpecError> {
        let names: Vec<(String,)> = sqlx::query_as("SELECT table_name FROM spec_tables ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(names.into_iter().map(|(n,)| n).collect())
    }

    async fn dataset_names(&self) -> Result<Vec<String>, SpecError> {
        let names: Vec<(String,)> =
            sqlx::query_as("SELECT dataset_name FROM spec_datasets ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(names.into_iter().map(|(n,)| n).collect())
    }

    async fn table_rows(&self, table: &str) -> Result<Vec<JsonRow>, SpecError> {
        if !self.is_whitelisted_table(table).await? {
            return Err(SpecError::NotWhitelisted(table.to_owned()));
        }
        self.reflect(table).await
    }

    async fn dataset_rows(&self, dataset: &str) -> Result<Vec<JsonRow>, SpecError> {
        if !self.is_whitelisted_dataset(dataset).await? {
            return Err(SpecError::DatasetNotFound(dataset.to_owned()));
        }
        self.reflect(dataset).await
    }

    async fn dataset_variables(&self, dataset: &str) -> Result<Vec<JsonRow>, SpecError> {
        let rows = sqlx::query("SELECT * FROM metadata WHERE dataset_name = ? ORDER BY id")
            .bind(dataset)
            .fetch_all(&self.pool)
            .await?;
        let rows = rows
            .iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
