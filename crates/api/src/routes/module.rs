//! Route definitions for modules and module-scoped sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{module, progress, sync, week, zoom};
use crate::state::AppState;

/// Routes mounted at `/modules`.
///
/// ```text
/// GET    /                     list
/// POST   /                     create
/// GET    /{id}                 get_by_id
/// PUT    /{id}                 update
/// DELETE /{id}                 delete (drafts only)
/// POST   /{id}/archive         archive
/// POST   /{id}/launch          launch_module
/// POST   /{id}/sync            sync_module
/// GET    /{id}/copies          list_copies
/// GET    /{id}/zoom            zoom get
/// PUT    /{id}/zoom            zoom upsert
/// DELETE /{id}/zoom            zoom delete
/// GET    /{id}/weeks           weeks list
/// POST   /{id}/weeks           weeks create
/// GET    /{id}/progress        own progress across the module
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(module::list).post(module::create))
        .route(
            "/{id}",
            get(module::get_by_id)
                .put(module::update)
                .delete(module::delete),
        )
        .route("/{id}/archive", post(module::archive))
        .route("/{id}/launch", post(sync::launch_module))
        .route("/{id}/sync", post(sync::sync_module))
        .route("/{id}/copies", get(module::list_copies))
        .route(
            "/{id}/zoom",
            get(zoom::get).put(zoom::upsert).delete(zoom::delete),
        )
        .route("/{id}/weeks", get(week::list_by_module).post(week::create))
        .route("/{id}/progress", get(progress::list_own_for_module))
}
