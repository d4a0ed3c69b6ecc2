//! Liveness and database connectivity checks

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Liveness response
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct DbPingResponse {
    pub db: &'static str,
}

/// GET /healthz
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// GET /db/ping - runs `SELECT 1` on a pooled connection
async fn db_ping(State(state): State<Arc<AppState>>) -> Result<Json<DbPingResponse>, ApiError> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| ApiError::Database(format!("DB connection failed: {}", e)))?;

    Ok(Json(DbPingResponse { db: "ok" }))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/db/ping", get(db_ping))
}
