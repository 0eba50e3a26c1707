//! Repository for the `backup_runs` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::backup::BackupRun;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, started_at, finished_at, status, file_path, module_count, error";

/// Bookkeeping for scheduled backup runs.
pub struct BackupRepo;

impl BackupRepo {
    /// Record the start of a backup run.
    pub async fn start(pool: &PgPool) -> Result<BackupRun, sqlx::Error> {
        let query = format!("INSERT INTO backup_runs DEFAULT VALUES RETURNING {COLUMNS}");
        sqlx::query_as::<_, BackupRun>(&query).fetch_one(pool).await
    }

    /// Mark a run as succeeded with its output file and module count.
    pub async fn finish_success(
        pool: &PgPool,
        id: DbId,
        file_path: &str,
        module_count: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE backup_runs SET status = 'succeeded', finished_at = NOW(),
                file_path = $2, module_count = $3
             WHERE id = $1",
        )
        .bind(id)
        .bind(file_path)
        .bind(module_count)
        .execute(pool)
        .await
        .map(|_| ())
    }

    /// Mark a run as failed with the error message.
    pub async fn finish_failure(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE backup_runs SET status = 'failed', finished_at = NOW(), error = $2
             WHERE id = $1",
        )
        .bind(id)
        .bind(error)
        .execute(pool)
        .await
        .map(|_| ())
    }

    /// List the most recent runs, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<BackupRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM backup_runs ORDER BY started_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, BackupRun>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
