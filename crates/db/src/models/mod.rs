//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod backup;
pub mod discussion;
pub mod module;
pub mod page;
pub mod progress;
pub mod question;
pub mod resource;
pub mod role;
pub mod session;
pub mod user;
pub mod video;
pub mod week;
pub mod zoom;
