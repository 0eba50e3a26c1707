//! Repository for the `resources` table.

use lectern_core::course::ResourceContent;
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::resource::{CreateResource, Resource, UpdateResource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_id, title, url, description, sort_order, created_at";

/// Provides CRUD operations for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Insert a new resource, returning the created row.
    ///
    /// If `sort_order` is `None`, defaults to 0.
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        input: &CreateResource,
    ) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (page_id, title, url, description, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(page_id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List all resources of a page, ordered by sort order ascending.
    pub async fn list_by_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM resources WHERE page_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a resource. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResource,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                description = COALESCE($4, description),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a resource.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a page's whole resource collection in one transaction:
    /// delete-all, insert-fresh. Resources carry no durable identity, so
    /// this is the only write path sync uses.
    pub async fn replace_all(
        pool: &PgPool,
        page_id: DbId,
        items: &[ResourceContent],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM resources WHERE page_id = $1")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;
        for item in items {
            sqlx::query(
                "INSERT INTO resources (page_id, title, url, description, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(page_id)
            .bind(&item.title)
            .bind(&item.url)
            .bind(&item.description)
            .bind(item.sort_order)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
