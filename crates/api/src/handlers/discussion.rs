//! Handlers for discussion threads, nested under questions:
//! `/questions/{question_id}/posts[/{id}]`.
//!
//! Posts belong to students. Authors may edit and delete their own posts;
//! faculty and admins may delete any post. Soft-deleted posts stay in the
//! thread with blanked content so reply trees remain navigable.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::roles::ROLE_STUDENT;
use lectern_core::types::DbId;
use lectern_db::models::discussion::{CreatePost, DiscussionPost, PostDeletion, UpdatePost};
use lectern_db::repositories::DiscussionRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/questions/{question_id}/posts
///
/// The whole thread, oldest first. Soft-deleted posts appear with empty
/// content.
pub async fn list_by_question(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(question_id): Path<DbId>,
) -> AppResult<Json<Vec<DiscussionPost>>> {
    let mut posts = DiscussionRepo::list_by_question(&state.pool, question_id).await?;
    for post in posts.iter_mut().filter(|p| p.is_deleted) {
        post.content.clear();
    }
    Ok(Json(posts))
}

/// POST /api/v1/questions/{question_id}/posts
///
/// Create a post, or a reply when `parent_id` is set. The parent must
/// belong to the same question.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(question_id): Path<DbId>,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<DiscussionPost>)> {
    input.validate()?;

    if let Some(parent_id) = input.parent_id {
        let parent = DiscussionRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Post",
                id: parent_id,
            }))?;
        if parent.question_id != question_id {
            return Err(AppError::BadRequest(
                "Parent post belongs to a different question".into(),
            ));
        }
    }

    let post = DiscussionRepo::create(&state.pool, question_id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/v1/questions/{question_id}/posts/{id}
///
/// Edit a post's content. Only the author may edit.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((_question_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<DiscussionPost>> {
    input.validate()?;

    let post = DiscussionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    if post.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can edit a post".into(),
        )));
    }

    let updated = DiscussionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/questions/{question_id}/posts/{id}
///
/// Authors delete their own posts; faculty and admins can moderate any.
/// Posts with replies are soft-deleted so the thread survives.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_question_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<serde_json::Value>> {
    let post = DiscussionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if post.user_id != user.user_id && user.role == ROLE_STUDENT {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or a moderator can delete a post".into(),
        )));
    }

    let outcome = DiscussionRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    let outcome_str = match outcome {
        PostDeletion::SoftDeleted => "soft_deleted",
        PostDeletion::Removed => "removed",
    };
    Ok(Json(serde_json::json!({ "outcome": outcome_str })))
}
