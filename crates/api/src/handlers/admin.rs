//! Admin-only handlers: user management and backup history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use lectern_db::models::backup::BackupRun;
use lectern_db::models::user::{CreateUser, UpdateUser, UserResponse};
use lectern_db::repositories::{BackupRepo, RoleRepo, SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// How many backup runs the history endpoint returns.
const BACKUP_HISTORY_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, serde::Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Role name: `admin`, `faculty`, or `student`.
    pub role: String,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, serde::Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

// ---------------------------------------------------------------------------
// User handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let mut out = Vec::with_capacity(users.len());
    for user in &users {
        let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
        out.push(UserResponse::from_user(user, &role));
    }
    Ok(Json(out))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = RoleRepo::find_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown role '{}'",
                input.role
            )))
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        role_id: role.id,
    };
    create.validate()?;

    let user = UserRepo::create(&state.pool, &create).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(&user, &role.name)),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(UserResponse::from_user(&user, &role)))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(UserResponse::from_user(&user, &role)))
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Replaces the password hash, clears lockout state, and revokes every
/// session so stale refresh tokens die with the old password.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::set_password_hash(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivates the account (no hard delete; posts and progress reference it).
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let input = UpdateUser {
        username: None,
        email: None,
        role_id: None,
        is_active: Some(false),
    };
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Backup history
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/backups
///
/// Recent scheduled-backup runs, newest first.
pub async fn list_backups(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<BackupRun>>> {
    let runs = BackupRepo::list_recent(&state.pool, BACKUP_HISTORY_LIMIT).await?;
    Ok(Json(runs))
}
