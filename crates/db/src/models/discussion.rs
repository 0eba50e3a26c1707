//! Discussion post model and DTOs.

use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `discussion_posts` table.
///
/// Posts form a reply tree via `parent_id`. They exist only on active
/// modules, are never touched by sync, and are soft-deleted when they have
/// replies so the thread structure survives.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscussionPost {
    pub id: DbId,
    pub question_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub edited_at: Option<Timestamp>,
}

/// DTO for creating a post or reply.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    /// Present when replying to an existing post in the same thread.
    pub parent_id: Option<DbId>,
}

/// DTO for editing a post's content.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePost {
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

/// Outcome of a post deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostDeletion {
    /// The post had replies and was soft-deleted in place.
    SoftDeleted,
    /// The post had no replies and was removed.
    Removed,
}
