//! Handlers for a module's zoom/meeting metadata:
//! `/modules/{module_id}/zoom`.
//!
//! The document is opaque JSON. During sync it is template-owned in full.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::repositories::ZoomRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// GET /api/v1/modules/{module_id}/zoom
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(module_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let data = ZoomRepo::get(&state.pool, module_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Zoom info",
            id: module_id,
        }))?;
    Ok(Json(data))
}

/// PUT /api/v1/modules/{module_id}/zoom
pub async fn upsert(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(module_id): Path<DbId>,
    Json(data): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let info = ZoomRepo::upsert(&state.pool, module_id, &data).await?;
    Ok(Json(info.data))
}

/// DELETE /api/v1/modules/{module_id}/zoom
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(module_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ZoomRepo::delete(&state.pool, module_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Zoom info",
            id: module_id,
        }))
    }
}
