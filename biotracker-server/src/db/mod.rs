//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, never a shared connection behind a mutex
//! - Reads run on one pooled connection, writes in one transaction
//! - Rely on DB constraints (foreign keys), map violations to errors

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod rows;

pub use error::DbError;
pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;
