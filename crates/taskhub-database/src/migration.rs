//! Database migration runner.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use taskhub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// One migration known to the binary, with its applied state.
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Migration version (timestamp prefix of the file name).
    pub version: i64,
    /// Description derived from the file name.
    pub description: String,
    /// When the migration was applied, if it was.
    pub applied_at: Option<DateTime<Utc>>,
}

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// List every embedded migration together with when it was applied.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>, AppError> {
    // The bookkeeping table does not exist before the first run.
    let applied: Vec<(i64, DateTime<Utc>)> = sqlx::query_as(
        "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .unwrap_or_default();

    Ok(MIGRATOR
        .iter()
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied_at: applied
                .iter()
                .find(|(version, _)| *version == m.version)
                .map(|(_, at)| *at),
        })
        .collect())
}
