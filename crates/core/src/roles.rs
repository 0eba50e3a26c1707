//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_FACULTY: &str = "faculty";
pub const ROLE_STUDENT: &str = "student";
