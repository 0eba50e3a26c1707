//! Repository for the `progress` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::{Progress, UpsertProgress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, week_id, current_page, completed, completed_at, created_at, updated_at";

/// Provides operations for per-user week progress, keyed (user, week).
pub struct ProgressRepo;

impl ProgressRepo {
    /// Insert or update a user's progress on a week. Omitted fields keep
    /// their current value; `completed_at` is stamped on the transition to
    /// completed and cleared if completion is revoked.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        week_id: DbId,
        input: &UpsertProgress,
    ) -> Result<Progress, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress (user_id, week_id, current_page, completed, completed_at)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, FALSE),
                     CASE WHEN COALESCE($4, FALSE) THEN NOW() END)
             ON CONFLICT ON CONSTRAINT uq_progress_user_week DO UPDATE SET
                current_page = COALESCE($3, progress.current_page),
                completed = COALESCE($4, progress.completed),
                completed_at = CASE
                    WHEN COALESCE($4, progress.completed) AND progress.completed_at IS NULL
                        THEN NOW()
                    WHEN NOT COALESCE($4, progress.completed)
                        THEN NULL
                    ELSE progress.completed_at
                END,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .bind(week_id)
            .bind(input.current_page)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    /// Find one user's progress on one week.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        week_id: DbId,
    ) -> Result<Option<Progress>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM progress WHERE user_id = $1 AND week_id = $2");
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .bind(week_id)
            .fetch_optional(pool)
            .await
    }

    /// List one user's progress across every week of a module, ordered by
    /// week number.
    pub async fn list_for_user_module(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<Vec<Progress>, sqlx::Error> {
        let query = "SELECT p.id, p.user_id, p.week_id, p.current_page, p.completed, \
                p.completed_at, p.created_at, p.updated_at
             FROM progress p
             JOIN weeks w ON w.id = p.week_id
             WHERE p.user_id = $1 AND w.module_id = $2
             ORDER BY w.number ASC";
        sqlx::query_as::<_, Progress>(query)
            .bind(user_id)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// List all progress rows for a week (faculty view / backup export).
    pub async fn list_by_week(pool: &PgPool, week_id: DbId) -> Result<Vec<Progress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress WHERE week_id = $1 ORDER BY user_id ASC"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(week_id)
            .fetch_all(pool)
            .await
    }
}
