//! Repository for the `pages` table.

use lectern_core::course::PageContent;
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, Page, UpdatePage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, week_id, position, title, kind, body, created_at, updated_at";

/// Provides CRUD operations for pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page, returning the created row.
    ///
    /// If `body` is `None`, defaults to an empty JSON object.
    pub async fn create(
        pool: &PgPool,
        week_id: DbId,
        input: &CreatePage,
    ) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (week_id, position, title, kind, body)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(week_id)
            .bind(input.position)
            .bind(&input.title)
            .bind(input.kind.as_str())
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a page by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all pages of a week, ordered by position ascending.
    pub async fn list_by_week(pool: &PgPool, week_id: DbId) -> Result<Vec<Page>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM pages WHERE week_id = $1 ORDER BY position ASC");
        sqlx::query_as::<_, Page>(&query)
            .bind(week_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a page. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePage,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET
                title = COALESCE($2, title),
                kind = COALESCE($3, kind),
                body = COALESCE($4, body),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.kind.map(|k| k.as_str()))
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every template-owned field. Used by sync.
    pub async fn overwrite_content(
        pool: &PgPool,
        id: DbId,
        content: &PageContent,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pages SET title = $2, kind = $3, body = $4, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&content.title)
        .bind(content.kind.as_str())
        .bind(&content.body)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a page. Questions (and their posts), resources,
    /// and videos cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
