//! Personnel repository

use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::{push_eq, push_page, push_search};
use crate::db::DbError;
use crate::models::{NewPersonnel, Pagination, PersonnelChanges, SearchTerm};

const RESOURCE: &str = "Personnel record";
const COLUMNS: &str = "id, member_id, preferred_name, full_name, status";

/// Personnel record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Personnel {
    pub id: i64,
    pub member_id: Option<i64>,
    pub preferred_name: Option<String>,
    pub full_name: Option<String>,
    pub status: Option<String>,
}

/// List filters for personnel
#[derive(Debug, Clone, Default)]
pub struct PersonnelFilter {
    /// Matches `preferred_name` or `full_name`
    pub q: Option<SearchTerm>,
    pub status: Option<String>,
    pub member_id: Option<i64>,
}

/// Personnel repository
pub struct PersonnelRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PersonnelRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List people ordered by name, case-insensitively.
    pub async fn list(&self, filter: &PersonnelFilter, page: Pagination) -> Result<Vec<Personnel>, DbError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM personnel WHERE 1 = 1", COLUMNS));
        if let Some(term) = &filter.q {
            push_search(&mut qb, &["preferred_name", "full_name"], term);
        }
        push_eq(&mut qb, "status", filter.status.clone());
        push_eq(&mut qb, "member_id", filter.member_id);
        qb.push(" ORDER BY lower(full_name) ASC, lower(preferred_name) ASC, id ASC");
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<Personnel>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Get a single person by id.
    pub async fn get(&self, id: i64) -> Result<Personnel, DbError> {
        sqlx::query_as::<_, Personnel>(&format!("SELECT {} FROM personnel WHERE id = ?", COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a person.
    pub async fn create(&self, new: &NewPersonnel) -> Result<Personnel, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Personnel>(&format!(
            r#"
            INSERT INTO personnel (member_id, preferred_name, full_name, status)
            VALUES (?, ?, ?, ?)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(new.member_id)
        .bind(&new.preferred_name)
        .bind(&new.full_name)
        .bind(&new.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Apply only the fields present in `changes`; `Some(None)` clears a column.
    pub async fn update(&self, id: i64, changes: &PersonnelChanges) -> Result<Personnel, DbError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut tx = self.pool.begin().await?;

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE personnel SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(member_id) = changes.member_id {
                set.push("member_id = ").push_bind_unseparated(member_id);
            }
            if let Some(preferred_name) = &changes.preferred_name {
                set.push("preferred_name = ")
                    .push_bind_unseparated(preferred_name.clone());
            }
            if let Some(full_name) = &changes.full_name {
                set.push("full_name = ").push_bind_unseparated(full_name.clone());
            }
            if let Some(status) = &changes.status {
                set.push("status = ").push_bind_unseparated(status.clone());
            }
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", COLUMNS));

        let row = qb
            .build_query_as::<Personnel>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a person.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM personnel WHERE id = ?")
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
