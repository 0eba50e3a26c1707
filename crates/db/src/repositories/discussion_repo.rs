//! Repository for the `discussion_posts` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::discussion::{CreatePost, DiscussionPost, PostDeletion, UpdatePost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, question_id, user_id, parent_id, content, is_deleted, created_at, edited_at";

/// Provides operations for the discussion post tree under a question.
pub struct DiscussionRepo;

impl DiscussionRepo {
    /// Insert a new post or reply, returning the created row.
    pub async fn create(
        pool: &PgPool,
        question_id: DbId,
        user_id: DbId,
        input: &CreatePost,
    ) -> Result<DiscussionPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussion_posts (question_id, user_id, parent_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiscussionPost>(&query)
            .bind(question_id)
            .bind(user_id)
            .bind(input.parent_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a post by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DiscussionPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM discussion_posts WHERE id = $1");
        sqlx::query_as::<_, DiscussionPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a question's whole thread, oldest first. Soft-deleted posts are
    /// included so reply trees stay navigable; callers blank their content
    /// for display.
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<DiscussionPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussion_posts
             WHERE question_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, DiscussionPost>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// Edit a post's content and stamp `edited_at`.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<DiscussionPost>, sqlx::Error> {
        let query = format!(
            "UPDATE discussion_posts SET content = $2, edited_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiscussionPost>(&query)
            .bind(id)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post: soft-delete in place when it has replies (so the
    /// thread structure survives), hard-delete otherwise.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<PostDeletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let reply_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM discussion_posts WHERE parent_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        let outcome = if reply_count > 0 {
            let result = sqlx::query(
                "UPDATE discussion_posts SET is_deleted = TRUE WHERE id = $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
            (result.rows_affected() > 0).then_some(PostDeletion::SoftDeleted)
        } else {
            let result = sqlx::query("DELETE FROM discussion_posts WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            (result.rows_affected() > 0).then_some(PostDeletion::Removed)
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Count every post under a question, soft-deleted included: a
    /// soft-deleted post still anchors replies, so it still pins the
    /// question's identity.
    pub async fn count_by_question(pool: &PgPool, question_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM discussion_posts WHERE question_id = $1")
            .bind(question_id)
            .fetch_one(pool)
            .await
    }
}
