//! Nutrition Labeler
//!
//! An MCP server for building and exporting nutrition facts labels.

use std::path::PathBuf;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use labeler::build_info;
use labeler::db;
use labeler::mcp::LabelerService;

/// Project root: the executable's directory, up out of target/release or target/debug
fn project_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }
    path
}

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("LABELER_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| project_dir().join("data").join("labeler.db"))
}

/// Get the export directory from environment or use default
fn get_export_dir() -> PathBuf {
    std::env::var("LABELER_EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| project_dir().join("data").join("exports"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr, stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("labeler=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let db_path = get_database_path();
    let export_dir = get_export_dir();
    eprintln!("Database path: {}", db_path.display());
    eprintln!("Export directory: {}", export_dir.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        if db::needs_migration(conn)? {
            eprintln!("Migrating database...");
        }
        db::run_migrations(conn)?;
        let version = db::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let service = LabelerService::new(db_path, database, export_dir);

    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;

    server.waiting().await?;

    Ok(())
}
