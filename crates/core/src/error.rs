use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// HTTP mapping lives in `lectern-api`; this crate only describes what went
/// wrong in domain terms.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed domain validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}
