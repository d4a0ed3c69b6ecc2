//! API error type with IntoResponse
//!
//! Every failure renders as `{"error": "<kind>", "detail": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::specs::SpecError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body, query or path failed validation (422)
    Validation(ValidationError),

    /// Row missing or name outside the whitelist (404)
    NotFound { detail: String },

    /// Foreign key violation (409)
    Conflict { detail: String },

    /// Database error (500, logged)
    Database(String),

    /// Anything else that went wrong server side (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Database(_) => "database_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { detail } | Self::Conflict { detail } => detail.clone(),
            Self::Database(message) | Self::Internal { message } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        match &self {
            Self::Database(_) => tracing::error!("Database error: {}", detail),
            Self::Internal { .. } => tracing::error!("Internal error: {}", detail),
            _ => {}
        }

        let body = json!({
            "error": self.kind(),
            "detail": detail,
        });
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::not_found(format!("{} not found", resource)),
            DbError::ForeignKey { message } => Self::Conflict { detail: message },
            DbError::Sqlx(e) => Self::Database(e.to_string()),
        }
    }
}

impl From<SpecError> for ApiError {
    fn from(e: SpecError) -> Self {
        match e {
            SpecError::NotWhitelisted(_) => Self::not_found(e.to_string()),
            SpecError::DatasetNotFound(_) => Self::not_found("Dataset not found"),
            SpecError::Load { .. } => Self::Internal {
                message: e.to_string(),
            },
            SpecError::Sqlx(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_422() {
        let (status, body) = body_json(ApiError::Validation(ValidationError::Empty { field: "name" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["detail"], "name cannot be empty");
    }

    #[tokio::test]
    async fn missing_row_uses_resource_detail() {
        let (status, body) = body_json(DbError::not_found("ProgramQC", 7).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "ProgramQC not found");
    }

    #[tokio::test]
    async fn foreign_key_is_409() {
        let err = ApiError::from(DbError::ForeignKey {
            message: "FOREIGN KEY constraint failed".into(),
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn spec_errors() {
        let (status, body) = body_json(SpecError::NotWhitelisted("users".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Table 'users' not whitelisted");

        let (status, body) = body_json(SpecError::DatasetNotFound("adxx".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Dataset not found");

        let (status, body) = body_json(SpecError::load("t_ghost", "no such table: t_ghost").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error loading table 't_ghost': no such table: t_ghost");
    }

    #[tokio::test]
    async fn database_error_exposes_raw_message() {
        let (status, body) = body_json(DbError::from(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "database_error");
        assert_eq!(body["detail"], sqlx::Error::PoolTimedOut.to_string());
    }
}
