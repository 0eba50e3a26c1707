//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `lectern_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod discussion;
pub mod module;
pub mod page;
pub mod progress;
pub mod question;
pub mod resource;
pub mod sync;
pub mod video;
pub mod week;
pub mod zoom;
