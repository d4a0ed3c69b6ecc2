//! QC comment repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::{push_eq, push_page, push_search};
use crate::db::DbError;
use crate::models::{NewQcComment, Pagination, QcCommentChanges, SearchTerm};

const RESOURCE: &str = "QCComment";
const COLUMNS: &str = "id, program_qc_id, author, comment_text, resolved, created_at, updated_at";

/// QC comment record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct QcComment {
    pub id: i64,
    pub program_qc_id: i64,
    pub author: String,
    pub comment_text: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List filters for QC comments
#[derive(Debug, Clone, Default)]
pub struct QcCommentFilter {
    pub program_qc_id: Option<i64>,
    pub resolved: Option<bool>,
    /// Matches `author` or `comment_text`
    pub q: Option<SearchTerm>,
}

/// QC comment repository
pub struct QcCommentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> QcCommentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List comments, newest first.
    pub async fn list(&self, filter: &QcCommentFilter, page: Pagination) -> Result<Vec<QcComment>, DbError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM qc_comments WHERE 1 = 1", COLUMNS));
        push_eq(&mut qb, "program_qc_id", filter.program_qc_id);
        push_eq(&mut qb, "resolved", filter.resolved);
        if let Some(term) = &filter.q {
            push_search(&mut qb, &["author", "comment_text"], term);
        }
        qb.push(" ORDER BY created_at DESC, id DESC");
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<QcComment>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Get a single comment by id.
    pub async fn get(&self, id: i64) -> Result<QcComment, DbError> {
        sqlx::query_as::<_, QcComment>(&format!("SELECT {} FROM qc_comments WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a comment. `resolved` defaults to false; an unknown
    /// `program_qc_id` fails with `ForeignKey`.
    pub async fn create(&self, new: &NewQcComment) -> Result<QcComment, DbError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, QcComment>(&format!(
            r#"
            INSERT INTO qc_comments
                (program_qc_id, author, comment_text, resolved, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(new.program_qc_id)
        .bind(&new.author)
        .bind(&new.comment_text)
        .bind(new.resolved.unwrap_or(false))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = row.id, program_qc_id = row.program_qc_id, "QC comment created");
        Ok(row)
    }

    /// Apply a partial update and refresh `updated_at`.
    pub async fn update(&self, id: i64, changes: &QcCommentChanges) -> Result<QcComment, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE qc_comments SET updated_at = ");
        qb.push_bind(Utc::now());
        if let Some(author) = &changes.author {
            qb.push(", author = ").push_bind(author.clone());
        }
        if let Some(text) = &changes.comment_text {
            qb.push(", comment_text = ").push_bind(text.clone());
        }
        if let Some(resolved) = changes.resolved {
            qb.push(", resolved = ").push_bind(resolved);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", COLUMNS));

        let row = qb
            .build_query_as::<QcComment>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a comment.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM qc_comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::ProgramQcRepo;
    use crate::db::{create_memory_pool, migrations};
    use crate::models::NewProgramQc;

    async fn setup() -> (SqlitePool, i64) {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        let qc = ProgramQcRepo::new(&pool)
            .create(&NewProgramQc {
                program_name: "t_ds_01.sas".into(),
                status: None,
                assignee: None,
                reviewer: None,
                deliverable_id: None,
            })
            .await
            .unwrap();
        (pool, qc.id)
    }

    fn comment(qc_id: i64, author: &str, text: &str) -> NewQcComment {
        NewQcComment {
            program_qc_id: qc_id,
            author: author.to_owned(),
            comment_text: text.to_owned(),
            resolved: None,
        }
    }

    #[tokio::test]
    async fn resolved_defaults_false() {
        let (pool, qc_id) = setup().await;
        let repo = QcCommentRepo::new(&pool);

        let created = repo.create(&comment(qc_id, "jd", "Footnote missing")).await.unwrap();
        assert!(!created.resolved);
        assert_eq!(repo.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn unknown_parent_is_rejected() {
        let (pool, _) = setup().await;
        let err = QcCommentRepo::new(&pool)
            .create(&comment(9999, "jd", "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));
    }

    #[tokio::test]
    async fn filter_by_resolved_and_text() {
        let (pool, qc_id) = setup().await;
        let repo = QcCommentRepo::new(&pool);
        let a = repo.create(&comment(qc_id, "Alice", "Check N counts")).await.unwrap();
        repo.create(&comment(qc_id, "Bob", "Title typo")).await.unwrap();
        repo.update(
            a.id,
            &QcCommentChanges {
                resolved: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let resolved = QcCommentFilter {
            resolved: Some(true),
            ..Default::default()
        };
        let rows = repo.list(&resolved, Pagination::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, a.id);

        let by_author = QcCommentFilter {
            q: SearchTerm::from_query(Some("BOB")),
            program_qc_id: Some(qc_id),
            ..Default::default()
        };
        let rows = repo.list(&by_author, Pagination::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment_text, "Title typo");
    }

    #[tokio::test]
    async fn parent_with_comments_cannot_be_deleted() {
        let (pool, qc_id) = setup().await;
        let repo = QcCommentRepo::new(&pool);
        let created = repo.create(&comment(qc_id, "jd", "x")).await.unwrap();

        let err = ProgramQcRepo::new(&pool).delete(qc_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));

        repo.delete(created.id).await.unwrap();
        ProgramQcRepo::new(&pool).delete(qc_id).await.unwrap();
    }
}
