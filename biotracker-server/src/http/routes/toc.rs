//! Table of contents endpoints for tables, figures and listings

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::{TocFilter, TocItem, TocRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidQuery;
use crate::http::server::AppState;
use crate::models::search::non_empty;
use crate::models::{Pagination, SearchTerm, TocKind};

/// Query parameters shared by the three TOC indexes
#[derive(Debug, Default, Deserialize)]
pub struct ListTocQuery {
    /// Substring of `code` or `title`
    pub q: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /toc/{tables,figures,listings}
async fn list_toc(
    state: Arc<AppState>,
    kind: TocKind,
    params: ListTocQuery,
) -> Result<Json<Vec<TocItem>>, ApiError> {
    let page = Pagination::new(params.limit, params.offset)?;
    let filter = TocFilter {
        q: SearchTerm::from_query(params.q.as_deref()),
        status: non_empty(params.status.as_deref()).map(str::to_owned),
    };

    let rows = TocRepo::new(&state.pool).list(kind, &filter, page).await?;
    Ok(Json(rows))
}

/// TOC routes, one per kind at `/toc/<plural>`
pub fn router() -> Router<Arc<AppState>> {
    TocKind::ALL.into_iter().fold(Router::new(), |router, kind| {
        router.route(
            &format!("/toc/{}", kind.plural()),
            get(
                move |State(state): State<Arc<AppState>>,
                      ValidQuery(params): ValidQuery<ListTocQuery>| async move {
                    list_toc(state, kind, params).await
                },
            ),
        )
    })
}
