//! biotracker-server: HTTP API for biometrics study tracking
//!
//! Deliverables, program QC with review comments, personnel, TOC indexes
//! for tables/figures/listings, and read-only access to whitelisted spec
//! tables. SQLite storage through a sqlx pool.

pub mod db;
pub mod http;
pub mod models;
pub mod specs;

pub use db::{create_pool, create_pool_with_options, migrations, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use specs::{CsvSpecSource, DatabaseSpecSource, SpecError, SpecSource};
