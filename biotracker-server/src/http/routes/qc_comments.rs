//! QC comment endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{QcComment, QcCommentFilter, QcCommentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{NewQcComment, Pagination, QcCommentChanges, SearchTerm};

/// Query parameters for GET /qc_comments
#[derive(Debug, Default, Deserialize)]
pub struct ListQcCommentsQuery {
    pub program_qc_id: Option<i64>,
    pub resolved: Option<bool>,
    /// Substring of `author` or `comment_text`
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /qc_comments
async fn list_qc_comments(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListQcCommentsQuery>,
) -> Result<Json<Vec<QcComment>>, ApiError> {
    let page = Pagination::new(params.limit, params.offset)?;
    let filter = QcCommentFilter {
        program_qc_id: params.program_qc_id,
        resolved: params.resolved,
        q: SearchTerm::from_query(params.q.as_deref()),
    };

    let rows = QcCommentRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(rows))
}

/// POST /qc_comments - 409 when `program_qc_id` does not exist
async fn create_qc_comment(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewQcComment>,
) -> Result<(StatusCode, Json<QcComment>), ApiError> {
    let row = QcCommentRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /qc_comments/{id}
async fn get_qc_comment(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<QcComment>, ApiError> {
    Ok(Json(QcCommentRepo::new(&state.pool).get(id).await?))
}

/// PATCH /qc_comments/{id}
async fn update_qc_comment(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidJson(changes): ValidJson<QcCommentChanges>,
) -> Result<Json<QcComment>, ApiError> {
    Ok(Json(QcCommentRepo::new(&state.pool).update(id, &changes).await?))
}

/// DELETE /qc_comments/{id}
async fn delete_qc_comment(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    QcCommentRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// QC comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/qc_comments", get(list_qc_comments).post(create_qc_comment))
        .route(
            "/qc_comments/{id}",
            get(get_qc_comment)
                .patch(update_qc_comment)
                .delete(delete_qc_comment),
        )
}
