//! Week entity model and DTOs.

use lectern_core::course::WeekContent;
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `weeks` table.
///
/// `number` is the week's ordinal within its module and the durable
/// cross-copy identity key used by sync.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Week {
    pub id: DbId,
    pub module_id: DbId,
    pub number: i32,
    pub title: String,
    pub description: Option<String>,
    pub unlock_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Week {
    pub fn content(&self) -> WeekContent {
        WeekContent {
            title: self.title.clone(),
            description: self.description.clone(),
            unlock_date: self.unlock_date,
        }
    }
}

/// DTO for creating a new week.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWeek {
    #[validate(range(min = 1))]
    pub number: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub unlock_date: Option<Timestamp>,
}

/// DTO for updating an existing week. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateWeek {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub unlock_date: Option<Timestamp>,
}
