//! Handlers for questions, nested under pages:
//! `/pages/{page_id}/questions[/{id}]`.
//!
//! A question's ordinal number is its durable identity; only the text is
//! editable. Deleting a question deletes its discussion thread, so the
//! handler refuses when posts exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::question::{CreateQuestion, Question, UpdateQuestion};
use lectern_db::repositories::{DiscussionRepo, QuestionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireFaculty};
use crate::state::AppState;

/// POST /api/v1/pages/{page_id}/questions
pub async fn create(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<(StatusCode, Json<Question>)> {
    input.validate()?;
    let question = QuestionRepo::create(&state.pool, page_id, &input).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// GET /api/v1/pages/{page_id}/questions
pub async fn list_by_page(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<Question>>> {
    let questions = QuestionRepo::list_by_page(&state.pool, page_id).await?;
    Ok(Json(questions))
}

/// PUT /api/v1/pages/{page_id}/questions/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path((_page_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateQuestion>,
) -> AppResult<Json<Question>> {
    input.validate()?;
    let question = QuestionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))?;
    Ok(Json(question))
}

/// DELETE /api/v1/pages/{page_id}/questions/{id}
///
/// Refuses with 409 when the question has discussion posts.
pub async fn delete(
    State(state): State<AppState>,
    RequireFaculty(_user): RequireFaculty,
    Path((_page_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let post_count = DiscussionRepo::count_by_question(&state.pool, id).await?;
    if post_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Question has {post_count} discussion posts and cannot be deleted"
        ))));
    }
    let deleted = QuestionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))
    }
}
