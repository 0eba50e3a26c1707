//! Handlers for weeks, nested under modules:
//! `/modules/{module_id}/weeks` and `/weeks/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::week::{CreateWeek, UpdateWeek, Week};
use lectern_db::repositories::WeekRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// POST /api/v1/modules/{module_id}/weeks
pub async fn create(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(module_id): Path<DbId>,
    Json(input): Json<CreateWeek>,
) -> AppResult<(StatusCode, Json<Week>)> {
    input.validate()?;
    let week = WeekRepo::create(&state.pool, module_id, &input).await?;
    Ok((StatusCode::CREATED, Json(week)))
}

/// GET /api/v1/modules/{module_id}/weeks
pub async fn list_by_module(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(module_id): Path<DbId>,
) -> AppResult<Json<Vec<Week>>> {
    let weeks = WeekRepo::list_by_module(&state.pool, module_id).await?;
    Ok(Json(weeks))
}

/// GET /api/v1/weeks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Week>> {
    let week = WeekRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Week", id }))?;
    Ok(Json(week))
}

/// PUT /api/v1/weeks/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWeek>,
) -> AppResult<Json<Week>> {
    input.validate()?;
    let week = WeekRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Week", id }))?;
    Ok(Json(week))
}

/// DELETE /api/v1/weeks/{id}
///
/// Manual deletion by an author; sync never deletes weeks.
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WeekRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Week", id }))
    }
}
