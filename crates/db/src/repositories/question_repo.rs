//! Repository for the `questions` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question, QuestionWithPostCount, UpdateQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_id, number, text, created_at, updated_at";

/// Provides CRUD operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        input: &CreateQuestion,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (page_id, number, text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(page_id)
            .bind(input.number)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// Find a question by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all questions of a page, ordered by question number ascending.
    pub async fn list_by_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM questions WHERE page_id = $1 ORDER BY number ASC");
        sqlx::query_as::<_, Question>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// List a page's questions joined with their live discussion post
    /// counts. Used when assembling the tree the sync engine walks.
    pub async fn list_with_post_counts(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<QuestionWithPostCount>, sqlx::Error> {
        sqlx::query_as::<_, QuestionWithPostCount>(
            "SELECT q.id, q.number, q.text, COUNT(p.id) AS post_count
             FROM questions q
             LEFT JOIN discussion_posts p ON p.question_id = q.id
             WHERE q.page_id = $1
             GROUP BY q.id, q.number, q.text
             ORDER BY q.number ASC",
        )
        .bind(page_id)
        .fetch_all(pool)
        .await
    }

    /// Update a question's text. The ordinal number is identity and never
    /// reassigned.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET text = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.text)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a question. Its discussion posts cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
