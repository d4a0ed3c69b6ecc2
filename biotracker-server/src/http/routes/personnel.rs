//! Personnel endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{Personnel, PersonnelFilter, PersonnelRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::search::non_empty;
use crate::models::{NewPersonnel, Pagination, PersonnelChanges, SearchTerm};

/// Query parameters for GET /personnel
#[derive(Debug, Default, Deserialize)]
pub struct ListPersonnelQuery {
    /// Substring of `preferred_name` or `full_name`
    pub q: Option<String>,
    pub status: Option<String>,
    pub member_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /personnel - alphabetical by full name
async fn list_personnel(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListPersonnelQuery>,
) -> Result<Json<Vec<Personnel>>, ApiError> {
    let page = Pagination::new(params.limit, params.offset)?;
    let filter = PersonnelFilter {
        q: SearchTerm::from_query(params.q.as_deref()),
        status: non_empty(params.status.as_deref()).map(str::to_owned),
        member_id: params.member_id,
    };

    let rows = PersonnelRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(rows))
}

/// POST /personnel
async fn create_personnel(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewPersonnel>,
) -> Result<(StatusCode, Json<Personnel>), ApiError> {
    let row = PersonnelRepo::new(&state.pool).create(&new).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /personnel/{id}
async fn get_personnel(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Personnel>, ApiError> {
    Ok(Json(PersonnelRepo::new(&state.pool).get(id).await?))
}

/// PATCH /personnel/{id} - an explicit null clears the column
async fn update_personnel(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ValidJson(changes): ValidJson<PersonnelChanges>,
) -> Result<Json<Personnel>, ApiError> {
    Ok(Json(PersonnelRepo::new(&state.pool).update(id, &changes).await?))
}

/// DELETE /personnel/{id}
async fn delete_personnel(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    PersonnelRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Personnel routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/personnel", get(list_personnel).post(create_personnel))
        .route(
            "/personnel/{id}",
            get(get_personnel)
                .patch(update_personnel)
                .delete(delete_personnel),
        )
}
