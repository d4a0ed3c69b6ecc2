//! Deliverable endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{Deliverable, DeliverableFilter, DeliverableRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{DeliverableChanges, NewDeliverable, Pagination, SearchTerm};

/// Query parameters for GET /deliverables
#[derive(Debug, Default, Deserialize)]
pub struct ListDeliverablesQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /deliverables
async fn list_deliverables(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListDeliverablesQuery>,
) -> Result<Json<Vec<Deliverable>>, ApiError> {
    let page = Pagination::new(params.limit, params.offset)?;
    let filter = DeliverableFilter {
        q: SearchTerm::from_query(params.q.as_deref()),
    };

    let rows = DeliverableRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(rows))
}

/// POST /deliverables
async fn create_deliverable(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewDeliverable>,
) -> Result<(StatusCode, Json<Deliverable>), ApiError> {
    let row = DeliverableRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /deliverables/{id}
async fn get_deliverable(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Deliverable>, ApiError> {
    Ok(Json(DeliverableRepo::new(&state.pool).get(id).await?))
}

/// PATCH /deliverables/{id}
async fn update_deliverable(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidJson(changes): ValidJson<DeliverableChanges>,
) -> Result<Json<Deliverable>, ApiError> {
    Ok(Json(DeliverableRepo::new(&state.pool).update(id, &changes).await?))
}

/// DELETE /deliverables/{id}
async fn delete_deliverable(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    DeliverableRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deliverable routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliverables", get(list_deliverables).post(create_deliverable))
        .route(
            "/deliverables/{id}",
            get(get_deliverable)
                .patch(update_deliverable)
                .delete(delete_deliverable),
        )
}
