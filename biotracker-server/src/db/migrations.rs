//! Schema creation
//!
//! Every statement is `IF NOT EXISTS`, so running at each startup is safe.

use sqlx::SqlitePool;

const SCHEMA: &[(&str, &str)] = &[
    (
        "deliverables",
        r#"
        CREATE TABLE IF NOT EXISTS deliverables (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(255) NOT NULL,
            status VARCHAR(50)
        )
        "#,
    ),
    (
        "program_qc",
        r#"
        CREATE TABLE IF NOT EXISTS program_qc (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_name VARCHAR(255) NOT NULL,
            status VARCHAR(50),
            assignee VARCHAR(100),
            reviewer VARCHAR(100),
            deliverable_id INTEGER REFERENCES deliverables(id),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "qc_comments",
        r#"
        CREATE TABLE IF NOT EXISTS qc_comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_qc_id INTEGER NOT NULL REFERENCES program_qc(id),
            author VARCHAR(100) NOT NULL,
            comment_text TEXT NOT NULL,
            resolved BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "personnel",
        r#"
        CREATE TABLE IF NOT EXISTS personnel (
            id INTEGER PRIMARY KEY,
            member_id INTEGER,
            preferred_name VARCHAR,
            full_name VARCHAR,
            status VARCHAR
        )
        "#,
    ),
    (
        "toc_items",
        r#"
        CREATE TABLE IF NOT EXISTS toc_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type VARCHAR(10) NOT NULL,
            code VARCHAR(50) NOT NULL,
            title VARCHAR(500),
            status VARCHAR(50),
            dataset VARCHAR(100),
            priority INTEGER
        )
        "#,
    ),
    (
        "spec_tables",
        r#"
        CREATE TABLE IF NOT EXISTS spec_tables (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            table_name VARCHAR(255) NOT NULL UNIQUE,
            description TEXT
        )
        "#,
    ),
    (
        "spec_datasets",
        r#"
        CREATE TABLE IF NOT EXISTS spec_datasets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            dataset_name VARCHAR(255) NOT NULL UNIQUE,
            description TEXT
        )
        "#,
    ),
    (
        "metadata",
        r#"
        CREATE TABLE IF NOT EXISTS metadata (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            dataset_name VARCHAR(255) NOT NULL,
            variable_name VARCHAR(255) NOT NULL,
            label TEXT,
            data_type VARCHAR(50),
            length INTEGER,
            origin VARCHAR(100),
            codelist VARCHAR(255)
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS ix_program_qc_deliverable_id ON program_qc (deliverable_id)",
    "CREATE INDEX IF NOT EXISTS ix_qc_comments_program_qc_id ON qc_comments (program_qc_id)",
    "CREATE INDEX IF NOT EXISTS ix_personnel_member_id ON personnel (member_id)",
    "CREATE INDEX IF NOT EXISTS ix_personnel_full_name ON personnel (full_name)",
    "CREATE INDEX IF NOT EXISTS ix_personnel_preferred_name ON personnel (preferred_name)",
    "CREATE INDEX IF NOT EXISTS ix_personnel_status ON personnel (status)",
    "CREATE INDEX IF NOT EXISTS ix_toc_items_type_priority ON toc_items (type, priority, code)",
    "CREATE INDEX IF NOT EXISTS ix_metadata_dataset_name ON metadata (dataset_name)",
];

/// Create every table and index the API serves.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    for (table, ddl) in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!(table, "table ready");
    }

    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!(tables = SCHEMA.len(), "schema migrations complete");
    Ok(())
}
