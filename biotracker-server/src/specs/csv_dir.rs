//! Spec tables read from a directory of CSV files
//!
//! Layout:
//!
//! ```text
//! <root>/tables/<table>.csv
//! <root>/datasets/<dataset>.csv
//! <root>/metadata.csv
//! ```
//!
//! The whitelist is whatever `.csv` files exist. Values come back as
//! strings, empty cells as `null`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{JsonRow, SpecError, SpecSource};

/// File stems that may be served. Rules out separators and leading dots.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("invalid spec name regex"));

const TABLES_DIR: &str = "tables";
const DATASETS_DIR: &str = "datasets";
const METADATA_FILE: &str = "metadata.csv";

/// Column in `metadata.csv` naming the dataset a variable belongs to
const DATASET_COLUMN: &str = "dataset_name";

/// CSV-backed spec source
#[derive(Debug, Clone)]
pub struct CsvSpecSource {
    root: PathBuf,
}

impl CsvSpecSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn tables_dir(&self) -> PathBuf {
        self.root.join(TABLES_DIR)
    }

    fn datasets_dir(&self) -> PathBuf {
        self.root.join(DATASETS_DIR)
    }

    /// Resolve a whitelisted file, or `None` if the name is not served.
    async fn whitelisted_file(&self, dir: PathBuf, name: &str) -> Result<Option<PathBuf>, SpecError> {
        if !is_valid_name(name) {
            return Ok(None);
        }
        let label = dir.display().to_string();
        let (dir, stems) =
            blocking(&label, move || list_stems(&dir).map(|stems| (dir, stems))).await?;
        if !stems.iter().any(|s| s == name) {
            return Ok(None);
        }
        Ok(Some(dir.join(format!("{}.csv", name))))
    }
}

fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Sorted `.csv` stems in a directory. A missing directory serves nothing.
fn list_stems(dir: &Path) -> io::Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        // Exact `csv` only: served files are reopened as `<stem>.csv`
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if is_valid_name(stem) {
                stems.push(stem.to_owned());
            }
        }
    }
    stems.sort();
    Ok(stems)
}

/// Read a headed CSV file into JSON objects keyed by header.
fn read_records(path: &Path) -> Result<Vec<JsonRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = JsonRow::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let value = match record.get(idx) {
                Some(cell) if !cell.is_empty() => Value::String(cell.to_owned()),
                _ => Value::Null,
            };
            row.insert(header.to_owned(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Run file IO off the async runtime.
async fn blocking<T, E, F>(name: &str, f: F) -> Result<T, SpecError>
where
    T: Send + 'static,
    E: std::fmt::Display,
    F: FnOnce() -> Result<T, E> + Send + 'static,
    E: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| SpecError::load(name, e))?
        .map_err(|e| SpecError::load(name, e))
}

#[async_trait]
impl SpecSource for CsvSpecSource {
    fn kind(&self) -> &'static str {
        "csv"
    }

    async fn table_names(&self) -> Result<Vec<String>, SpecError> {
        let dir = self.tables_dir();
        blocking(TABLES_DIR, move || list_stems(&dir)).await
    }

    async fn dataset_names(&self) -> Result<Vec<String>, SpecError> {
        let dir = self.datasets_dir();
        blocking(DATASETS_DIR, move || list_stems(&dir)).await
    }

    async fn table_rows(&self, table: &str) -> Result<Vec<JsonRow>, SpecError> {
        let path = self
            .whitelisted_file(self.tables_dir(), table)
            .await?
            .ok_or_else(|| SpecError::NotWhitelisted(table.to_owned()))?;
        blocking(table, move || read_records(&path)).await
    }

    async fn dataset_rows(&self, dataset: &str) -> Result<Vec<JsonRow>, SpecError> {
        let path = self
            .whitelisted_file(self.datasets_dir(), dataset)
            .await?
            .ok_or_else(|| SpecError::DatasetNotFound(dataset.to_owned()))?;
        blocking(dataset, move || read_records(&path)).await
    }

    async fn dataset_variables(&self, dataset: &str) -> Result<Vec<JsonRow>, SpecError> {
        let path = self.root.join(METADATA_FILE);
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let rows = blocking(METADATA_FILE, move || read_records(&path)).await?;
        Ok(rows
            .into_iter()
            .filter(|row| row.get(DATASET_COLUMN).and_then(Value::as_str) == Some(dataset))
            .collect())
    }
}
