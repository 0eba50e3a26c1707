//! Question entity model and DTOs.

use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `questions` table.
///
/// `number` is the 1-based ordinal within the page. It is the question's
/// durable identity across sync: the anchor that keeps discussion threads
/// attached when the text changes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub page_id: DbId,
    pub number: i32,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A question joined with its discussion post count. Used when loading a
/// page tree for sync, which must know whether a question carries posts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionWithPostCount {
    pub id: DbId,
    pub number: i32,
    pub text: String,
    pub post_count: i64,
}

/// DTO for creating a new question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(range(min = 1))]
    pub number: i32,
    #[validate(length(min = 1))]
    pub text: String,
}

/// DTO for updating an existing question. Only the text is mutable; the
/// ordinal number is identity and never reassigned.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestion {
    #[validate(length(min = 1))]
    pub text: String,
}
