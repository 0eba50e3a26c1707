//! Repository for the `roles` table.

use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Provides lookups for the seeded role rows.
pub struct RoleRepo;

impl RoleRepo {
    /// List all roles.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at FROM roles ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a role by name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Resolve a role id to its name.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(pool)
            .await
    }
}
