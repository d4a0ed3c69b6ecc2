//! Program QC endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{ProgramQc, ProgramQcFilter, ProgramQcRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::search::non_empty;
use crate::models::{NewProgramQc, Pagination, ProgramQcChanges, SearchTerm};

/// Query parameters for GET /program_qc
#[derive(Debug, Default, Deserialize)]
pub struct ListProgramQcQuery {
    /// Substring of `program_name`
    pub q: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub reviewer: Option<String>,
    pub deliverable_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListProgramQcQuery {
    fn filter(&self) -> ProgramQcFilter {
        ProgramQcFilter {
            q: SearchTerm::from_query(self.q.as_deref()),
            status: non_empty(self.status.as_deref()).map(str::to_owned),
            assignee: non_empty(self.assignee.as_deref()).map(str::to_owned),
            reviewer: non_empty(self.reviewer.as_deref()).map(str::to_owned),
            deliverable_id: self.deliverable_id,
        }
    }
}

/// GET /program_qc - newest first
async fn list_program_qc(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListProgramQcQuery>,
) -> Result<Json<Vec<ProgramQc>>, ApiError> {
    let page = Pagination::new(params.limit, params.offset)?;
    let rows = ProgramQcRepo::new(&state.pool)
        .list(&params.filter(), page)
        .await?;
    Ok(Json(rows))
}

/// POST /program_qc
async fn create_program_qc(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewProgramQc>,
) -> Result<(StatusCode, Json<ProgramQc>), ApiError> {
    let row = ProgramQcRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /program_qc/{id}
async fn get_program_qc(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ProgramQc>, ApiError> {
    Ok(Json(ProgramQcRepo::new(&state.pool).get(id).await?))
}

/// PATCH /program_qc/{id} - absent or null fields keep their value
async fn update_program_qc(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidJson(changes): ValidJson<ProgramQcChanges>,
) -> Result<Json<ProgramQc>, ApiError> {
    Ok(Json(ProgramQcRepo::new(&state.pool).update(id, &changes).await?))
}

/// DELETE /program_qc/{id}
async fn delete_program_qc(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    ProgramQcRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Program QC routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/program_qc", get(list_program_qc).post(create_program_qc))
        .route(
            "/program_qc/{id}",
            get(get_program_qc)
                .patch(update_program_qc)
                .delete(delete_program_qc),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_are_dropped() {
        let query = ListProgramQcQuery {
            q: Some(String::new()),
            status: Some(String::new()),
            assignee: Some("kim".into()),
            ..Default::default()
        };
        let filter = query.filter();
        assert!(filter.q.is_none());
        assert!(filter.status.is_none());
        assert_eq!(filter.assignee.as_deref(), Some("kim"));
    }
}
