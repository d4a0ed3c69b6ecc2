//! Deliverable repository

use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::{push_page, push_search};
use crate::db::DbError;
use crate::models::{DeliverableChanges, NewDeliverable, Pagination, SearchTerm};

const RESOURCE: &str = "Deliverable";

/// Deliverable record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Deliverable {
    pub id: i64,
    pub name: String,
    pub status: Option<String>,
}

/// List filters for deliverables
#[derive(Debug, Clone, Default)]
pub struct DeliverableFilter {
    /// Matches `name` or `status`
    pub q: Option<SearchTerm>,
}

/// Deliverable repository
pub struct DeliverableRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DeliverableRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List deliverables ordered by id.
    pub async fn list(
        &self,
        filter: &DeliverableFilter,
        page: Pagination,
    ) -> Result<Vec<Deliverable>, DbError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id, name, status FROM deliverables WHERE 1 = 1");
        if let Some(term) = &filter.q {
            push_search(&mut qb, &["name", "status"], term);
        }
        qb.push(" ORDER BY id ASC");
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<Deliverable>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Get a single deliverable by id.
    pub async fn get(&self, id: i64) -> Result<Deliverable, DbError> {
        sqlx::query_as::<_, Deliverable>("SELECT id, name, status FROM deliverables WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a deliverable and return the stored row.
    pub async fn create(&self, new: &NewDeliverable) -> Result<Deliverable, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Deliverable>(
            r#"
            INSERT INTO deliverables (name, status)
            VALUES (?, ?)
            RETURNING id, name, status
            "#,
        )
        .bind(&new.name)
        .bind(&new.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = row.id, "deliverable created");
        Ok(row)
    }

    /// Apply a partial update. Fields left as `None` keep their value.
    pub async fn update(&self, id: i64, changes: &DeliverableChanges) -> Result<Deliverable, DbError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE deliverables SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &changes.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(status) = &changes.status {
                set.push("status = ").push_bind_unseparated(status.clone());
            }
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id, name, status");

        let row = qb
            .build_query_as::<Deliverable>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a deliverable. Fails with `ForeignKey` while QC records reference it.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM deliverables WHERE id = ?")
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
    use crate::db::{create_memory_pool, migrations};

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    fn new(name: &str, status: Option<&str>) -> NewDeliverable {
        NewDeliverable {
            name: name.to_owned(),
            status: status.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let pool = setup().await;
        let repo = DeliverableRepo::new(&pool);

        let created = repo.create(&new("Interim CSR", Some("draft"))).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "Interim CSR");
        assert_eq!(fetched.status.as_deref(), Some("draft"));
    }

    #[tokio::test]
    async fn search_matches_name_or_status() {
        let pool = setup().await;
        let repo = DeliverableRepo::new(&pool);
        repo.create(&new("Topline Tables", None)).await.unwrap();
        repo.create(&new("DSMB Pack", Some("TOPLINE review"))).await.unwrap();
        repo.create(&new("Final CSR", Some("done"))).await.unwrap();

        let filter = DeliverableFilter {
            q: SearchTerm::from_query(Some("topline")),
        };
        let rows = repo.list(&filter, Pagination::default()).await.unwrap();
        let names: Vec<_> = rows.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Topline Tables", "DSMB Pack"]);
    }

    #[tokio::test]
    async fn search_matches_accented_text() {
        let pool = setup().await;
        let repo = DeliverableRepo::new(&pool);
        repo.create(&new("ÉTUDE Summary", None)).await.unwrap();
        repo.create(&new("Other", None)).await.unwrap();

        for q in ["ÉTUDE", "ÉTUDE summary", "Étude SUMMARY", "summary"] {
            let filter = DeliverableFilter {
                q: SearchTerm::from_query(Some(q)),
            };
            let rows = repo.list(&filter, Pagination::default()).await.unwrap();
            assert_eq!(rows.len(), 1, "{q}");
            assert_eq!(rows[0].name, "ÉTUDE Summary");
        }
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = setup().await;
        let repo = DeliverableRepo::new(&pool);
        repo.create(&new("t_14_1", None)).await.unwrap();
        repo.create(&new("tx14x1", None)).await.unwrap();

        let filter = DeliverableFilter {
            q: SearchTerm::from_query(Some("t_14")),
        };
        let rows = repo.list(&filter, Pagination::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "t_14_1");
    }

    #[tokio::test]
    async fn pagination_windows() {
        let pool = setup().await;
        let repo = DeliverableRepo::new(&pool);
        for i in 0..7 {
            repo.create(&new(&format!("D{}", i), None)).await.unwrap();
        }

        let page = Pagination::new(Some(3), Some(5)).unwrap();
        let rows = repo.list(&DeliverableFilter::default(), page).await.unwrap();
        let names: Vec<_> = rows.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["D5", "D6"]);
    }

    #[tokio::test]
    async fn partial_update_and_delete() {
        let pool = setup().await;
        let repo = DeliverableRepo::new(&pool);
        let created = repo.create(&new("SAP", Some("draft"))).await.unwrap();

        let changes = DeliverableChanges {
            name: None,
            status: Some("final".into()),
        };
        let updated = repo.update(created.id, &changes).await.unwrap();
        assert_eq!(updated.name, "SAP");
        assert_eq!(updated.status.as_deref(), Some("final"));

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.get(created.id).await,
            Err(DbError::NotFound { resource: "Deliverable", .. })
        ));
        assert!(matches!(repo.delete(created.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_missing_row() {
        let pool = setup().await;
        let changes = DeliverableChanges {
            name: Some("x".into()),
            status: None,
        };
        let err = DeliverableRepo::new(&pool).update(99, &changes).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
