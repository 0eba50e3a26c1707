//! Page entity model and DTOs.

use lectern_core::course::{PageContent, PageKind};
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `pages` table.
///
/// `position` is the 0-based index within the week; pages are matched
/// positionally across template/active copies.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub week_id: DbId,
    pub position: i32,
    pub title: String,
    /// One of `discussion`, `intro`, `reading` (database CHECK enforced).
    pub kind: String,
    pub body: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Page {
    /// `None` if the stored kind is not a known variant (cannot happen with
    /// the CHECK constraint intact).
    pub fn content(&self) -> Option<PageContent> {
        Some(PageContent {
            title: self.title.clone(),
            kind: PageKind::parse(&self.kind)?,
            body: self.body.clone(),
        })
    }
}

/// DTO for creating a new page.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePage {
    #[validate(range(min = 0))]
    pub position: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub kind: PageKind,
    /// Defaults to an empty object if omitted.
    pub body: Option<serde_json::Value>,
}

/// DTO for updating an existing page. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePage {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub kind: Option<PageKind>,
    pub body: Option<serde_json::Value>,
}
