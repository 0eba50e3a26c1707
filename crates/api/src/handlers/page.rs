//! Handlers for pages, nested under weeks:
//! `/weeks/{week_id}/pages` and `/pages/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::page::{CreatePage, Page, UpdatePage};
use lectern_db::repositories::PageRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// POST /api/v1/weeks/{week_id}/pages
pub async fn create(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(week_id): Path<DbId>,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<Page>)> {
    input.validate()?;
    let page = PageRepo::create(&state.pool, week_id, &input).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/v1/weeks/{week_id}/pages
pub async fn list_by_week(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(week_id): Path<DbId>,
) -> AppResult<Json<Vec<Page>>> {
    let pages = PageRepo::list_by_week(&state.pool, week_id).await?;
    Ok(Json(pages))
}

/// GET /api/v1/pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Page>> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// PUT /api/v1/pages/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<Page>> {
    input.validate()?;
    let page = PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// DELETE /api/v1/pages/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PageRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Page", id }))
    }
}
