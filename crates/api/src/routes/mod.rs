//! Route tree assembly.

pub mod admin;
pub mod auth;
pub mod health;
pub mod module;
pub mod page;
pub mod question;
pub mod week;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout (requires auth)
///
/// /admin/users[...]                            user management (admin only)
/// /admin/backups                               backup run history (admin only)
///
/// /modules                                     list, create
/// /modules/{id}                                get, update, delete
/// /modules/{id}/archive                        archive (POST)
/// /modules/{id}/launch                         launch copy (POST)
/// /modules/{id}/sync                           sync from template (POST)
/// /modules/{id}/copies                         launched copies
/// /modules/{id}/zoom                           zoom info get/put/delete
/// /modules/{id}/weeks                          list, create
/// /modules/{id}/progress                       own progress across module
///
/// /weeks/{id}                                  get, update, delete
/// /weeks/{id}/pages                            list, create
/// /weeks/{id}/progress                         own progress get/put
/// /weeks/{id}/progress/all                     week progress (faculty)
///
/// /pages/{id}                                  get, update, delete
/// /pages/{id}/questions[/{id}]                 list, create, update, delete
/// /pages/{id}/resources[/{id}]                 list, create, update, delete
/// /pages/{id}/videos[/{id}]                    list, create, update, delete
///
/// /questions/{id}/posts[/{id}]                 discussion threads
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/modules", module::router())
        .nest("/weeks", week::router())
        .nest("/pages", page::router())
        .nest("/questions", question::router())
}
