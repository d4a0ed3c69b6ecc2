//! Whitelisted spec table and dataset endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::specs::JsonRow;

/// GET /specs - whitelisted table names
async fn list_tables(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.specs.table_names().await?))
}

/// GET /specs/datasets
async fn list_datasets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.specs.dataset_names().await?))
}

/// GET /specs/{table}
async fn table_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
) -> Result<Json<Vec<JsonRow>>, ApiError> {
    let rows = state.specs.table_rows(&table).await?;
    tracing::debug!(table = %table, rows = rows.len(), "spec table loaded");
    Ok(Json(rows))
}

/// GET /specs/datasets/{dataset}
async fn dataset_rows(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
) -> Result<Json<Vec<JsonRow>>, ApiError> {
    Ok(Json(state.specs.dataset_rows(&dataset).await?))
}

/// GET /specs/datasets/{dataset}/variables
async fn dataset_variables(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
) -> Result<Json<Vec<JsonRow>>, ApiError> {
    Ok(Json(state.specs.dataset_variables(&dataset).await?))
}

/// Spec routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/specs", get(list_tables))
        .route("/specs/datasets", get(list_datasets))
        .route("/specs/datasets/{dataset}", get(dataset_rows))
        .route("/specs/datasets/{dataset}/variables", get(dataset_variables))
        .route("/specs/{table}", get(table_rows))
}
