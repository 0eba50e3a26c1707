//! Repository for the `videos` table.

use lectern_core::course::VideoContent;
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, UpdateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_id, title, url, duration_secs, sort_order, created_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    ///
    /// If `sort_order` is `None`, defaults to 0.
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (page_id, title, url, duration_secs, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(page_id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.duration_secs)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List all videos of a page, ordered by sort order ascending.
    pub async fn list_by_page(pool: &PgPool, page_id: DbId) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos WHERE page_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a video. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                duration_secs = COALESCE($4, duration_secs),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.duration_secs)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a video.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a page's whole video collection in one transaction:
    /// delete-all, insert-fresh.
    pub async fn replace_all(
        pool: &PgPool,
        page_id: DbId,
        items: &[VideoContent],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM videos WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;
        for item in items {
            sqlx::query(
                "INSERT INTO videos (page_id, title, url, duration_secs, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(page_id)
            .bind(&item.title)
            .bind(&item.url)
            .bind(item.duration_secs)
            .bind(item.sort_order)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
