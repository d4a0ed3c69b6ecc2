//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - List queries are built with `QueryBuilder`, every filter bound, never spliced
//! - Single-row misses become `DbError::NotFound`
//! - Writes run in a transaction and return the stored row via `RETURNING`

pub mod deliverables;
pub mod program_qc;
pub mod qc_comments;
pub mod personnel;
pub mod toc;

pub use deliverables::{Deliverable, DeliverableFilter, DeliverableRepo};
pub use program_qc::{ProgramQc, ProgramQcFilter, ProgramQcRepo};
pub use qc_comments::{QcComment, QcCommentFilter, QcCommentRepo};
pub use personnel::{Personnel, PersonnelFilter, PersonnelRepo};
pub use toc::{TocFilter, TocItem, TocRepo};

use sqlx::{QueryBuilder, Sqlite};

use crate::models::search::LIKE_ESCAPE;
use crate::models::{Pagination, SearchTerm};

/// Append `AND (lower(a) LIKE lower(?) OR lower(b) LIKE lower(?) ...)`.
///
/// Column and pattern both go through SQLite's `lower()`.
/// The builder must already hold a WHERE clause.
pub(crate) fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, columns: &[&str], term: &SearchTerm) {
    qb.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(format!("lower({}) LIKE lower(", column))
            .push_bind(term.pattern().to_owned())
            .push(format!(") ESCAPE '{}'", LIKE_ESCAPE));
    }
    qb.push(")");
}

/// Append an equality filter when the value is present.
pub(crate) fn push_eq<'args, T>(qb: &mut QueryBuilder<'args, Sqlite>, column: &str, value: Option<T>)
where
    T: 'args + sqlx::Encode<'args, Sqlite> + sqlx::Type<Sqlite> + Send,
{
    if let Some(value) = value {
        qb.push(format!(" AND {} = ", column)).push_bind(value);
    }
}

/// Append `LIMIT ? OFFSET ?`.
pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: Pagination) {
    qb.push(" LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());
}
