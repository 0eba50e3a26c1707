//! Repository for the `modules` table.

use lectern_core::course::ModuleContent;
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::module::{CreateModule, Module, UpdateModule};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, instructor, duration, participation, \
    time_expectations, status, template_id, launched_at, archived_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for modules.
pub struct ModuleRepo;

impl ModuleRepo {
    /// Insert a new draft module, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateModule) -> Result<Module, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules
                (title, description, instructor, duration, participation, time_expectations)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.instructor)
            .bind(&input.duration)
            .bind(&input.participation)
            .bind(&input.time_expectations)
            .fetch_one(pool)
            .await
    }

    /// Find a module by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all modules, optionally filtered by status, newest first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List the launched copies of a given template.
    pub async fn list_by_template(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules WHERE template_id = $1 ORDER BY launched_at ASC"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a module's content fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateModule,
    ) -> Result<Option<Module>, sqlx::Error> {
        let query = format!(
            "UPDATE modules SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                instructor = COALESCE($4, instructor),
                duration = COALESCE($5, duration),
                participation = COALESCE($6, participation),
                time_expectations = COALESCE($7, time_expectations),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.instructor)
            .bind(&input.duration)
            .bind(&input.participation)
            .bind(&input.time_expectations)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every template-owned content field. Used by sync, which
    /// must also clear fields the template cleared (COALESCE patching
    /// cannot express that).
    pub async fn overwrite_content(
        pool: &PgPool,
        id: DbId,
        content: &ModuleContent,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE modules SET
                title = $2, description = $3, instructor = $4, duration = $5,
                participation = $6, time_expectations = $7, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.instructor)
        .bind(&content.duration)
        .bind(&content.participation)
        .bind(&content.time_expectations)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Create the launched copy of a template at launch time: same content
    /// fields, status `launched`, back-reference to the template. The
    /// content tree is populated afterwards by the sync engine.
    pub async fn create_launched_copy(
        pool: &PgPool,
        template: &Module,
    ) -> Result<Module, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules
                (title, description, instructor, duration, participation,
                 time_expectations, status, template_id, launched_at)
             VALUES ($1, $2, $3, $4, $5, $6, 'launched', $7, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(&template.title)
            .bind(&template.description)
            .bind(&template.instructor)
            .bind(&template.duration)
            .bind(&template.participation)
            .bind(&template.time_expectations)
            .bind(template.id)
            .fetch_one(pool)
            .await
    }

    /// Archive a launched module. Returns `false` if the module does not
    /// exist or is not currently launched.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE modules SET status = 'archived', archived_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = 'launched'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a module. Content cascades; launched copies keep
    /// running with their template link nulled.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
