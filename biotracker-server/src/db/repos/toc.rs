//! Table-of-contents repository (tables, figures, listings share one table)

use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::{push_eq, push_page, push_search};
use crate::db::DbError;
use crate::models::{Pagination, SearchTerm, TocKind};

/// TOC item record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TocItem {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub dataset: Option<String>,
    pub priority: Option<i64>,
}

/// List filters for one TOC index
#[derive(Debug, Clone, Default)]
pub struct TocFilter {
    /// Matches `code` or `title`
    pub q: Option<SearchTerm>,
    pub status: Option<String>,
}

/// TOC repository
pub struct TocRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TocRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List items of one kind by priority (unprioritized last), then code.
    pub async fn list(&self, kind: TocKind, filter: &TocFilter, page: Pagination) -> Result<Vec<TocItem>, DbError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT id, type, code, title, status, dataset, priority FROM toc_items WHERE type = ",
        );
        qb.push_bind(kind.as_str());
        if let Some(term) = &filter.q {
            push_search(&mut qb, &["code", "title"], term);
        }
        push_eq(&mut qb, "status", filter.status.clone());
        qb.push(" ORDER BY priority IS NULL, priority ASC, code ASC");
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<TocItem>().fetch_all(self.pool).await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, migrations};

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();

        let items: &[(&str, &str, &str, Option<i64>, &str)] = &[
            ("table", "t_14_1_02", "Demographics by Site", Some(2), "done"),
            ("table", "t_14_1_01", "Demographics", Some(1), "open"),
            ("table", "t_14_3_01", "Adverse Events", None, "open"),
            ("table", "t_14_2_01", "Efficacy Summary", Some(1), "open"),
            ("figure", "f_14_1_01", "KM Plot", Some(1), "open"),
            ("listing", "l_16_2_01", "Demographics Listing", None, "open"),
        ];
        for (kind, code, title, priority, status) in items {
            sqlx::query(
                "INSERT INTO toc_items (type, code, title, priority, status) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(*kind)
            .bind(*code)
            .bind(*title)
            .bind(*priority)
            .bind(*status)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn priority_then_code_with_nulls_last() {
        let pool = setup().await;
        let rows = TocRepo::new(&pool)
            .list(TocKind::Table, &TocFilter::default(), Pagination::default())
            .await
            .unwrap();
        let codes: Vec<_> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["t_14_1_01", "t_14_2_01", "t_14_1_02", "t_14_3_01"]);
        assert!(rows.iter().all(|r| r.kind == "table"));
    }

    #[tokio::test]
    async fn search_code_or_title_within_kind() {
        let pool = setup().await;
        let repo = TocRepo::new(&pool);
        let filter = TocFilter {
            q: SearchTerm::from_query(Some("demographics")),
            status: Some("open".into()),
        };

        let tables = repo.list(TocKind::Table, &filter, Pagination::default()).await.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].code, "t_14_1_01");

        let listings = repo.list(TocKind::Listing, &filter, Pagination::default()).await.unwrap();
        assert_eq!(listings.len(), 1);

        let figures = repo.list(TocKind::Figure, &filter, Pagination::default()).await.unwrap();
        assert!(figures.is_empty());
    }
}
