//! Program QC repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::{push_eq, push_page, push_search};
use crate::db::DbError;
use crate::models::{NewProgramQc, Pagination, ProgramQcChanges, SearchTerm};

const RESOURCE: &str = "ProgramQC";
const COLUMNS: &str =
    "id, program_name, status, assignee, reviewer, deliverable_id, created_at, updated_at";

/// Program QC record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProgramQc {
    pub id: i64,
    pub program_name: String,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub reviewer: Option<String>,
    pub deliverable_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List filters for program QC records. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct ProgramQcFilter {
    /// Substring of `program_name`
    pub q: Option<SearchTerm>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub reviewer: Option<String>,
    pub deliverable_id: Option<i64>,
}

/// Program QC repository
pub struct ProgramQcRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProgramQcRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List records, newest first.
    pub async fn list(&self, filter: &ProgramQcFilter, page: Pagination) -> Result<Vec<ProgramQc>, DbError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM program_qc WHERE 1 = 1", COLUMNS));
        if let Some(term) = &filter.q {
            push_search(&mut qb, &["program_name"], term);
        }
        push_eq(&mut qb, "status", filter.status.clone());
        push_eq(&mut qb, "assignee", filter.assignee.clone());
        push_eq(&mut qb, "reviewer", filter.reviewer.clone());
        push_eq(&mut qb, "deliverable_id", filter.deliverable_id);
        qb.push(" ORDER BY created_at DESC, id DESC");
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<ProgramQc>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Get a single record by id.
    pub async fn get(&self, id: i64) -> Result<ProgramQc, DbError> {
        sqlx::query_as::<_, ProgramQc>(&format!("SELECT {} FROM program_qc WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a record. An unknown `deliverable_id` fails with `ForeignKey`.
    pub async fn create(&self, new: &NewProgramQc) -> Result<ProgramQc, DbError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProgramQc>(&format!(
            r#"
            INSERT INTO program_qc
                (program_name, status, assignee, reviewer, deliverable_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&new.program_name)
        .bind(&new.status)
        .bind(&new.assignee)
        .bind(&new.reviewer)
        .bind(new.deliverable_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = row.id, program = %row.program_name, "program QC created");
        Ok(row)
    }

    /// Apply a partial update and refresh `updated_at`.
    pub async fn update(&self, id: i64, changes: &ProgramQcChanges) -> Result<ProgramQc, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE program_qc SET updated_at = ");
        qb.push_bind(Utc::now());
        if let Some(name) = &changes.program_name {
            qb.push(", program_name = ").push_bind(name.clone());
        }
        if let Some(status) = &changes.status {
            qb.push(", status = ").push_bind(status.clone());
        }
        if let Some(assignee) = &changes.assignee {
            qb.push(", assignee = ").push_bind(assignee.clone());
        }
        if let Some(reviewer) = &changes.reviewer {
            qb.push(", reviewer = ").push_bind(reviewer.clone());
        }
        if let Some(deliverable_id) = changes.deliverable_id {
            qb.push(", deliverable_id = ").push_bind(deliverable_id);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", COLUMNS));

        let row = qb
            .build_query_as::<ProgramQc>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a record. Fails with `ForeignKey` while comments reference it.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM program_qc WHERE id = ?")
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
    use crate::db::repos::DeliverableRepo;
    use crate::db::{create_memory_pool, migrations};
    use crate::models::NewDeliverable;

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    fn new(program: &str, status: Option<&str>, assignee: Option<&str>) -> NewProgramQc {
        NewProgramQc {
            program_name: program.to_owned(),
            status: status.map(str::to_owned),
            assignee: assignee.map(str::to_owned),
            reviewer: None,
            deliverable_id: None,
        }
    }

    #[tokio::test]
    async fn create_sets_timestamps() {
        let pool = setup().await;
        let repo = ProgramQcRepo::new(&pool);

        let created = repo.create(&new("t_dm_01.sas", Some("open"), None)).await.unwrap();
        assert_eq!(created.updated_at, Some(created.created_at));

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn filters_are_combined() {
        let pool = setup().await;
        let repo = ProgramQcRepo::new(&pool);
        repo.create(&new("t_ae_01.sas", Some("open"), Some("alice"))).await.unwrap();
        repo.create(&new("t_ae_02.sas", Some("passed"), Some("alice"))).await.unwrap();
        repo.create(&new("l_ae_01.sas", Some("open"), Some("bob"))).await.unwrap();

        let filter = ProgramQcFilter {
            q: SearchTerm::from_query(Some("T_AE")),
            status: Some("open".into()),
            assignee: Some("alice".into()),
            ..Default::default()
        };
        let rows = repo.list(&filter, Pagination::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].program_name, "t_ae_01.sas");
    }

    #[tokio::test]
    async fn newest_first() {
        let pool = setup().await;
        let repo = ProgramQcRepo::new(&pool);
        let first = repo.create(&new("a.sas", None, None)).await.unwrap();
        let second = repo.create(&new("b.sas", None, None)).await.unwrap();

        let rows = repo.list(&ProgramQcFilter::default(), Pagination::default()).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, [second.id, first.id]);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let pool = setup().await;
        let repo = ProgramQcRepo::new(&pool);
        let created = repo.create(&new("t_vs_01.sas", Some("open"), Some("alice"))).await.unwrap();

        let changes = ProgramQcChanges {
            reviewer: Some("carol".into()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &changes).await.unwrap();
        assert_eq!(updated.program_name, "t_vs_01.sas");
        assert_eq!(updated.status.as_deref(), Some("open"));
        assert_eq!(updated.assignee.as_deref(), Some("alice"));
        assert_eq!(updated.reviewer.as_deref(), Some("carol"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn deliverable_reference_is_enforced() {
        let pool = setup().await;
        let repo = ProgramQcRepo::new(&pool);

        let mut payload = new("t_lb_01.sas", None, None);
        payload.deliverable_id = Some(404);
        assert!(matches!(repo.create(&payload).await, Err(DbError::ForeignKey { .. })));

        let deliverable = DeliverableRepo::new(&pool)
            .create(&NewDeliverable {
                name: "CSR".into(),
                status: None,
            })
            .await
            .unwrap();
        payload.deliverable_id = Some(deliverable.id);
        let created = repo.create(&payload).await.unwrap();

        let filter = ProgramQcFilter {
            deliverable_id: Some(deliverable.id),
            ..Default::default()
        };
        let rows = repo.list(&filter, Pagination::default()).await.unwrap();
        assert_eq!(rows, vec![created]);

        // still referenced
        assert!(matches!(
            DeliverableRepo::new(&pool).delete(deliverable.id).await,
            Err(DbError::ForeignKey { .. })
        ));
    }

    #[tokio::test]
    async fn delete_then_get() {
        let pool = setup().await;
        let repo = ProgramQcRepo::new(&pool);
        let created = repo.create(&new("x.sas", None, None)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(matches!(repo.get(created.id).await, Err(DbError::NotFound { .. })));
    }
}
