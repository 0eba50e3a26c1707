//! Health check endpoint, mounted at the root (not under `/api/v1`).

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Routes mounted at the application root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Always returns 200 with the crate version; `db_healthy` reflects a live
/// connectivity probe so load balancers can distinguish app-up from db-up.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = lectern_db::health_check(&state.pool).await.is_ok();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
