//! Per-user week progress model and DTOs.

use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `progress` table, unique per (user, week). Owned by the
/// active module's lifetime; sync never writes to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Progress {
    pub id: DbId,
    pub user_id: DbId,
    pub week_id: DbId,
    pub current_page: i32,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a user's progress on a week. Omitted fields keep their
/// current value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProgress {
    pub current_page: Option<i32>,
    pub completed: Option<bool>,
}
