//! Handlers for the `/modules` resource: authoring CRUD and lifecycle.
//!
//! Draft modules are authoring templates. Launch and sync (which propagate
//! a template into its launched copies) live in
//! [`super::sync`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::roles::ROLE_STUDENT;
use lectern_core::types::DbId;
use lectern_db::models::module::{CreateModule, Module, UpdateModule};
use lectern_db::repositories::ModuleRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// Query parameters for module listing.
#[derive(Debug, serde::Deserialize)]
pub struct ListModulesParams {
    /// Filter by status (`draft`, `launched`, `archived`).
    pub status: Option<String>,
}

/// GET /api/v1/modules
///
/// Students only ever see launched modules; faculty and admins see
/// everything, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListModulesParams>,
) -> AppResult<Json<Vec<Module>>> {
    let status = if user.role == ROLE_STUDENT {
        Some("launched")
    } else {
        params.status.as_deref()
    };
    let modules = ModuleRepo::list(&state.pool, status).await?;
    Ok(Json(modules))
}

/// POST /api/v1/modules
///
/// Create a new draft module (an authoring template).
pub async fn create(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Json(input): Json<CreateModule>,
) -> AppResult<(StatusCode, Json<Module>)> {
    input.validate()?;
    let module = ModuleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// GET /api/v1/modules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Module>> {
    let module = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))?;
    if user.role == ROLE_STUDENT && module.status != "launched" {
        return Err(AppError::Core(CoreError::Forbidden(
            "Students can only view launched modules".into(),
        )));
    }
    Ok(Json(module))
}

/// PUT /api/v1/modules/{id}
///
/// Patch a module's content fields. Editing a draft is the normal authoring
/// flow; the changes reach launched copies on the next sync.
pub async fn update(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateModule>,
) -> AppResult<Json<Module>> {
    input.validate()?;
    let module = ModuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))?;
    Ok(Json(module))
}

/// POST /api/v1/modules/{id}/archive
///
/// Move a launched module to `archived`. Returns 409 if the module is not
/// currently launched.
pub async fn archive(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<Json<Module>> {
    let archived = ModuleRepo::archive(&state.pool, id).await?;
    if !archived {
        return Err(AppError::Core(CoreError::Conflict(
            "Only launched modules can be archived".into(),
        )));
    }
    let module = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))?;
    Ok(Json(module))
}

/// DELETE /api/v1/modules/{id}
///
/// Permanently delete a draft module. Launched copies keep running with
/// their template link nulled; launched/archived modules themselves cannot
/// be deleted through the API.
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let module = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))?;
    if module.status != "draft" {
        return Err(AppError::Core(CoreError::Conflict(
            "Only draft modules can be deleted".into(),
        )));
    }
    ModuleRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/modules/{id}/copies
///
/// List the launched copies of a template, oldest first.
pub async fn list_copies(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Module>>> {
    let copies = ModuleRepo::list_by_template(&state.pool, id).await?;
    Ok(Json(copies))
}
