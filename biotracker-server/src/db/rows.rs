//! Untyped row conversion for reflected tables
//!
//! SQLite types values per cell, so conversion follows each value's
//! storage class rather than the declared column type.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// One reflected row: column name to JSON value, in column order
pub type JsonRow = Map<String, Value>;

/// Convert a row of any shape into a JSON object.
///
/// INTEGER and REAL become numbers, TEXT a string, BLOB a base64 string,
/// NULL `null`. Non-finite REAL values become `null`.
pub fn row_to_json(row: &SqliteRow) -> Result<JsonRow, sqlx::Error> {
    let mut object = Map::with_capacity(row.columns().len());

    for (idx, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let storage = raw.type_info().name().to_owned();
            match storage.as_str() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Number::from_f64(row.try_get::<f64, _>(idx)?)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                "BLOB" => Value::String(STANDARD.encode(row.try_get::<Vec<u8>, _>(idx)?)),
                _ => Value::String(row.try_get::<String, _>(idx)?),
            }
        };
        object.insert(column.name().to_owned(), value);
    }

    Ok(object)
}
