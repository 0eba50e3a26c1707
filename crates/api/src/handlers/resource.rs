//! Handlers for resources, nested under pages:
//! `/pages/{page_id}/resources[/{id}]`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::resource::{CreateResource, Resource, UpdateResource};
use lectern_db::repositories::ResourceRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// POST /api/v1/pages/{page_id}/resources
pub async fn create(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    input.validate()?;
    let resource = ResourceRepo::create(&state.pool, page_id, &input).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// GET /api/v1/pages/{page_id}/resources
pub async fn list_by_page(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<Resource>>> {
    let resources = ResourceRepo::list_by_page(&state.pool, page_id).await?;
    Ok(Json(resources))
}

/// PUT /api/v1/pages/{page_id}/resources/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path((_page_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateResource>,
) -> AppResult<Json<Resource>> {
    input.validate()?;
    let resource = ResourceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Resource",
            id,
        }))?;
    Ok(Json(resource))
}

/// DELETE /api/v1/pages/{page_id}/resources/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path((_page_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ResourceRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Resource",
            id,
        }))
    }
}
