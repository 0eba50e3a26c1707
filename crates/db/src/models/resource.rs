//! Resource entity model and DTOs.

use lectern_core::course::ResourceContent;
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `resources` table. Resources carry no durable identity;
/// sync replaces a page's whole collection.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub page_id: DbId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl Resource {
    pub fn content(&self) -> ResourceContent {
        ResourceContent {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            sort_order: self.sort_order,
        }
    }
}

/// DTO for creating a new resource.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResource {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub url: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing resource. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateResource {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}
