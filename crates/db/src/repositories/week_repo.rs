//! Repository for the `weeks` table.

use lectern_core::course::WeekContent;
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::week::{CreateWeek, UpdateWeek, Week};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, module_id, number, title, description, unlock_date, created_at, updated_at";

/// Provides CRUD operations for weeks.
pub struct WeekRepo;

impl WeekRepo {
    /// Insert a new week, returning the created row.
    pub async fn create(
        pool: &PgPool,
        module_id: DbId,
        input: &CreateWeek,
    ) -> Result<Week, sqlx::Error> {
        let query = format!(
            "INSERT INTO weeks (module_id, number, title, description, unlock_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Week>(&query)
            .bind(module_id)
            .bind(input.number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.unlock_date)
            .fetch_one(pool)
            .await
    }

    /// Find a week by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Week>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weeks WHERE id = $1");
        sqlx::query_as::<_, Week>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all weeks of a module, ordered by week number ascending.
    pub async fn list_by_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<Week>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM weeks WHERE module_id = $1 ORDER BY number ASC");
        sqlx::query_as::<_, Week>(&query)
            .bind(module_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a week. Only non-`None` fields in `input` are applied.
    ///
    /// The week number is identity and not patchable.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWeek,
    ) -> Result<Option<Week>, sqlx::Error> {
        let query = format!(
            "UPDATE weeks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                unlock_date = COALESCE($4, unlock_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Week>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.unlock_date)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every template-owned field. Used by sync.
    pub async fn overwrite_content(
        pool: &PgPool,
        id: DbId,
        content: &WeekContent,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE weeks SET title = $2, description = $3, unlock_date = $4, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.unlock_date)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a week. Pages, questions, and progress cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weeks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
