//! Launch and sync operations: the two paths that propagate template
//! content into an active copy.
//!
//! Launch creates a bare launched module carrying the template's
//! module-level fields and then runs the sync engine to populate its content
//! tree. Sync re-runs the engine against an existing copy. One propagation
//! code path serves both.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::sync::{EntityCounts, SyncEngine, SyncReport, SyncWriteError};
use lectern_core::types::DbId;
use lectern_db::models::module::Module;
use lectern_db::repositories::ModuleRepo;
use lectern_db::sync_store::PgModuleStore;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireFaculty;
use crate::state::AppState;

/// Per-entity tallies of a sync run, as returned to the caller.
#[derive(Debug, serde::Serialize)]
pub struct SyncSummary {
    pub modules: EntityCounts,
    pub weeks: EntityCounts,
    pub pages: EntityCounts,
    pub questions: EntityCounts,
    pub resources_replaced: u32,
    pub videos_replaced: u32,
    pub zoom_updated: bool,
}

/// Response body for sync and launch: distinguishes "ran cleanly" from
/// "ran with partial errors". "Did not run" surfaces as an error status
/// instead.
#[derive(Debug, serde::Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub summary: SyncSummary,
    pub errors: Vec<SyncWriteError>,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        Self {
            success: report.ran_clean(),
            summary: SyncSummary {
                modules: report.modules,
                weeks: report.weeks,
                pages: report.pages,
                questions: report.questions,
                resources_replaced: report.resources_replaced,
                videos_replaced: report.videos_replaced,
                zoom_updated: report.zoom_updated,
            },
            errors: report.errors,
        }
    }
}

/// Response body for a launch: the new module plus the populating sync run.
#[derive(Debug, serde::Serialize)]
pub struct LaunchResponse {
    pub module: Module,
    pub sync: SyncResponse,
}

/// POST /api/v1/modules/{id}/sync
///
/// Propagate the linked template's content into this launched module.
pub async fn sync_module(
    State(state): State<AppState>,
    RequireFaculty(user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<Json<SyncResponse>> {
    tracing::info!(module_id = id, user_id = user.user_id, "Sync requested");

    let store = PgModuleStore::new(state.pool.clone());
    let report = SyncEngine::new(&store).sync_from_link(id).await?;

    Ok(Json(SyncResponse::from(report)))
}

/// POST /api/v1/modules/{id}/launch
///
/// Create a launched copy of a draft module and populate its content tree.
pub async fn launch_module(
    State(state): State<AppState>,
    RequireFaculty(user): RequireFaculty,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<LaunchResponse>)> {
    let template = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))?;
    if template.status != "draft" {
        return Err(AppError::Core(CoreError::Conflict(
            "Only draft modules can be launched".into(),
        )));
    }

    let copy = ModuleRepo::create_launched_copy(&state.pool, &template).await?;
    tracing::info!(
        template_id = template.id,
        module_id = copy.id,
        user_id = user.user_id,
        "Module launched; populating content"
    );

    let store = PgModuleStore::new(state.pool.clone());
    let report = SyncEngine::new(&store)
        .sync_to_active_module(template.id, copy.id)
        .await?;

    // Re-read so the response carries the module fields the populating run
    // may have touched.
    let module = ModuleRepo::find_by_id(&state.pool, copy.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id: copy.id,
        }))?;

    Ok((
        StatusCode::CREATED,
        Json(LaunchResponse {
            module,
            sync: SyncResponse::from(report),
        }),
    ))
}
