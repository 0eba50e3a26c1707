//! Handlers for per-user week progress:
//! `/weeks/{week_id}/progress` (own), `/weeks/{week_id}/progress/all`
//! (faculty), `/modules/{module_id}/progress` (own, across the module).

use axum::extract::{Path, State};
use axum::Json;
use lectern_core::types::DbId;
use lectern_db::models::progress::{Progress, UpsertProgress};
use lectern_db::repositories::ProgressRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// GET /api/v1/weeks/{week_id}/progress
///
/// The caller's own progress on the week; `null` when none recorded yet.
pub async fn get_own(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(week_id): Path<DbId>,
) -> AppResult<Json<Option<Progress>>> {
    let progress = ProgressRepo::find(&state.pool, user.user_id, week_id).await?;
    Ok(Json(progress))
}

/// PUT /api/v1/weeks/{week_id}/progress
///
/// Upsert the caller's own progress on the week.
pub async fn upsert_own(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(week_id): Path<DbId>,
    Json(input): Json<UpsertProgress>,
) -> AppResult<Json<Progress>> {
    let progress = ProgressRepo::upsert(&state.pool, user.user_id, week_id, &input).await?;
    Ok(Json(progress))
}

/// GET /api/v1/weeks/{week_id}/progress/all
///
/// Every student's progress on the week. Faculty view.
pub async fn list_for_week(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(week_id): Path<DbId>,
) -> AppResult<Json<Vec<Progress>>> {
    let rows = ProgressRepo::list_by_week(&state.pool, week_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/modules/{module_id}/progress
///
/// The caller's own progress across every week of the module.
pub async fn list_own_for_module(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(module_id): Path<DbId>,
) -> AppResult<Json<Vec<Progress>>> {
    let rows = ProgressRepo::list_for_user_module(&state.pool, user.user_id, module_id).await?;
    Ok(Json(rows))
}
