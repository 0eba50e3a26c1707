//! Zoom/meeting metadata model.

use lectern_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `zoom_info` table: one opaque JSON document per module.
/// Template-owned in full during sync.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ZoomInfo {
    pub module_id: DbId,
    pub data: serde_json::Value,
    pub updated_at: Timestamp,
}
