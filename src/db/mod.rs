//! Label storage
//!
//! SQLite connection pool and schema migrations for saved labels.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
pub use migrations::{get_schema_version, needs_migration, run_migrations};
