//! Backup run bookkeeping model.

use lectern_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `backup_runs` table, one per scheduled backup attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BackupRun {
    pub id: DbId,
    pub started_at: Timestamp,
    pub finished_at: Option<Timestamp>,
    /// One of `running`, `succeeded`, `failed` (database CHECK enforced).
    pub status: String,
    pub file_path: Option<String>,
    pub module_count: Option<i32>,
    pub error: Option<String>,
}
