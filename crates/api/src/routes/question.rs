//! Route definitions for question-scoped discussion threads.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::discussion;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET    /{question_id}/posts         list_by_question
/// POST   /{question_id}/posts         create
/// PUT    /{question_id}/posts/{id}    update (author only)
/// DELETE /{question_id}/posts/{id}    delete (author or moderator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{question_id}/posts",
            get(discussion::list_by_question).post(discussion::create),
        )
        .route(
            "/{question_id}/posts/{id}",
            put(discussion::update).delete(discussion::delete),
        )
}
