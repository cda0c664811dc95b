pub mod models;

pub use models::*;

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

pub type DbPool = SqlitePool;

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<()> {
    // Comment lines go first: a ';' inside a comment must not split a
    // statement apart.
    let cleaned: String = sql
        .lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");
    for statement in cleaned.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

pub async fn init(data_dir: &Path, config: &DatabaseConfig) -> Result<DbPool> {
    let db_path = data_dir.join("careerbase.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    info!("Initializing database at {}", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&db_url)
        .await?;

    configure(&pool, config.busy_timeout_ms).await?;
    run_migrations(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

/// Session pragmas: WAL for concurrent readers, foreign keys for cascade
/// deletes, bounded busy wait so writers fail instead of hanging.
async fn configure(pool: &SqlitePool, busy_timeout_ms: u64) -> Result<()> {
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;
    sqlx::query(&format!("PRAGMA busy_timeout = {}", busy_timeout_ms))
        .execute(pool)
        .await?;
    Ok(())
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    // Migration 001: Initial schema
    execute_sql(pool, include_str!("../../migrations/001_initial.sql")).await?;

    // Migration 002: Add template_style column to documents
    let has_template_style: Option<(String,)> = sqlx::query_as(
        "SELECT name FROM pragma_table_info('documents') WHERE name = 'template_style'",
    )
    .fetch_optional(pool)
    .await?;
    if has_template_style.is_none() {
        execute_sql(pool, include_str!("../../migrations/002_template_style.sql")).await?;
    }

    info!("Migrations completed");
    Ok(())
}

/// In-memory pool with the full schema, for tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    configure(&pool, 1000).await.expect("pragmas");
    run_migrations(&pool).await.expect("migrations");
    pool
}
