//! Repository error type

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A write referenced a missing parent row, or deleted a row still referenced
    #[error("foreign key violation: {message}")]
    ForeignKey { message: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation) {
                return Self::ForeignKey {
                    message: db_err.message().to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
