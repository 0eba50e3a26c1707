//! Route definitions for weeks and week-scoped sub-resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{page, progress, week};
use crate::state::AppState;

/// Routes mounted at `/weeks`.
///
/// ```text
/// GET    /{id}                 get_by_id
/// PUT    /{id}                 update
/// DELETE /{id}                 delete
/// GET    /{id}/pages           pages list
/// POST   /{id}/pages           pages create
/// GET    /{id}/progress        own progress get
/// PUT    /{id}/progress        own progress upsert
/// GET    /{id}/progress/all    week progress (faculty)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(week::get_by_id).put(week::update).delete(week::delete),
        )
        .route("/{id}/pages", get(page::list_by_week).post(page::create))
        .route(
            "/{id}/progress",
            get(progress::get_own).put(progress::upsert_own),
        )
        .route("/{id}/progress/all", get(progress::list_for_week))
}
