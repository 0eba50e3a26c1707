//! Video entity model and DTOs.

use lectern_core::course::VideoContent;
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `videos` table. Videos carry no durable identity; sync
/// replaces a page's whole collection.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub page_id: DbId,
    pub title: String,
    pub url: String,
    pub duration_secs: Option<i32>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl Video {
    pub fn content(&self) -> VideoContent {
        VideoContent {
            title: self.title.clone(),
            url: self.url.clone(),
            duration_secs: self.duration_secs,
            sort_order: self.sort_order,
        }
    }
}

/// DTO for creating a new video.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVideo {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub url: String,
    pub duration_secs: Option<i32>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing video. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateVideo {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub duration_secs: Option<i32>,
    pub sort_order: Option<i32>,
}
