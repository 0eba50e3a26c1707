//! Background tasks spawned by the API binary.

pub mod session_cleanup;
