//! Repository for the `zoom_info` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::zoom::ZoomInfo;

/// Provides access to a module's opaque meeting metadata.
pub struct ZoomRepo;

impl ZoomRepo {
    /// Fetch a module's zoom document, if one exists.
    pub async fn get(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar("SELECT data FROM zoom_info WHERE module_id = $1")
            .bind(module_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite a module's zoom document.
    pub async fn upsert(
        pool: &PgPool,
        module_id: DbId,
        data: &serde_json::Value,
    ) -> Result<ZoomInfo, sqlx::Error> {
        sqlx::query_as::<_, ZoomInfo>(
            "INSERT INTO zoom_info (module_id, data)
             VALUES ($1, $2)
             ON CONFLICT (module_id) DO UPDATE SET data = $2, updated_at = NOW()
             RETURNING module_id, data, updated_at",
        )
        .bind(module_id)
        .bind(data)
        .fetch_one(pool)
        .await
    }

    /// Remove a module's zoom document. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, module_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM zoom_info WHERE module_id = $1")
            .bind(module_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
