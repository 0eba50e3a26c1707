//! Route definitions for pages and page-scoped collections.

use axum::routing::get;
use axum::Router;

use crate::handlers::{page, question, resource, video};
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /{id}                        get_by_id
/// PUT    /{id}                        update
/// DELETE /{id}                        delete
///
/// GET    /{page_id}/questions         list_by_page
/// POST   /{page_id}/questions         create
/// PUT    /{page_id}/questions/{id}    update
/// DELETE /{page_id}/questions/{id}    delete
///
/// GET    /{page_id}/resources         list_by_page
/// POST   /{page_id}/resources         create
/// PUT    /{page_id}/resources/{id}    update
/// DELETE /{page_id}/resources/{id}    delete
///
/// GET    /{page_id}/videos            list_by_page
/// POST   /{page_id}/videos            create
/// PUT    /{page_id}/videos/{id}       update
/// DELETE /{page_id}/videos/{id}       delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(page::get_by_id).put(page::update).delete(page::delete),
        )
        .route(
            "/{page_id}/questions",
            get(question::list_by_page).post(question::create),
        )
        .route(
            "/{page_id}/questions/{id}",
            axum::routing::put(question::update).delete(question::delete),
        )
        .route(
            "/{page_id}/resources",
            get(resource::list_by_page).post(resource::create),
        )
        .route(
            "/{page_id}/resources/{id}",
            axum::routing::put(resource::update).delete(resource::delete),
        )
        .route(
            "/{page_id}/videos",
            get(video::list_by_page).post(video::create),
        )
        .route(
            "/{page_id}/videos/{id}",
            axum::routing::put(video::update).delete(video::delete),
        )
}
