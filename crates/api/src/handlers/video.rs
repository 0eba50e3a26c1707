//! Handlers for videos, nested under pages:
//! `/pages/{page_id}/videos[/{id}]`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::video::{CreateVideo, UpdateVideo, Video};
use lectern_db::repositories::VideoRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// POST /api/v1/pages/{page_id}/videos
pub async fn create(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<Video>)> {
    input.validate()?;
    let video = VideoRepo::create(&state.pool, page_id, &input).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// GET /api/v1/pages/{page_id}/videos
pub async fn list_by_page(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<Video>>> {
    let videos = VideoRepo::list_by_page(&state.pool, page_id).await?;
    Ok(Json(videos))
}

/// PUT /api/v1/pages/{page_id}/videos/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path((_page_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<Video>> {
    input.validate()?;
    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    Ok(Json(video))
}

/// DELETE /api/v1/pages/{page_id}/videos/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path((_page_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = VideoRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))
    }
}
