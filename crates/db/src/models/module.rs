//! Module entity model and DTOs.

use lectern_core::course::{ModuleContent, ModuleRecord, ModuleStatus};
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub participation: Option<String>,
    pub time_expectations: Option<String>,
    /// One of `draft`, `launched`, `archived` (database CHECK enforced).
    pub status: String,
    pub template_id: Option<DbId>,
    pub launched_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Module {
    /// The template-owned field set, as the sync engine sees it.
    pub fn content(&self) -> ModuleContent {
        ModuleContent {
            title: self.title.clone(),
            description: self.description.clone(),
            instructor: self.instructor.clone(),
            duration: self.duration.clone(),
            participation: self.participation.clone(),
            time_expectations: self.time_expectations.clone(),
        }
    }

    /// Convert to the engine's value object. `None` if the stored status is
    /// not a known variant (cannot happen with the CHECK constraint intact).
    pub fn to_record(&self) -> Option<ModuleRecord> {
        Some(ModuleRecord {
            id: self.id,
            content: self.content(),
            status: ModuleStatus::parse(&self.status)?,
            template_id: self.template_id,
            launched_at: self.launched_at,
            archived_at: self.archived_at,
        })
    }
}

/// DTO for creating a new draft module.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModule {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub participation: Option<String>,
    pub time_expectations: Option<String>,
}

/// DTO for updating an existing module. All fields are optional; only
/// template-owned content fields are patchable — lifecycle fields move
/// through launch/archive operations.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateModule {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub participation: Option<String>,
    pub time_expectations: Option<String>,
}
