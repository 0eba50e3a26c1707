//! Template-to-active-module synchronization engine.
//!
//! Propagates edits from a draft "template" module into an already-launched
//! "active" copy while preserving student-generated data (discussion posts,
//! progress records). Data flows one direction only: the template is a
//! read-only source, the active module a read-write target.
//!
//! Layering, leaf-first:
//!
//! - [`resolver`] — matches template entities to active counterparts by
//!   ordinal/positional identity (never by row id).
//! - [`merge`] — per-entity change detection over the template-owned field
//!   sets; an unchanged entity produces no write, which is what makes a
//!   sync run idempotent.
//! - [`reconcile`] — three-way partition of ordered sibling collections
//!   into matched / template-only / active-only, plus the excess policies.
//! - [`engine`] — the orchestrator: precondition checks, top-down walk,
//!   concurrent sibling branches, per-branch error collection.
//!
//! Storage is reached only through the [`ModuleStore`] trait. [`memory`]
//! provides the in-memory reference backend the engine tests run against;
//! `lectern-db` provides the PostgreSQL backend.

pub mod engine;
pub mod memory;
pub mod merge;
pub mod reconcile;
pub mod resolver;
pub mod report;
pub mod store;

pub use engine::{SyncEngine, SyncError};
pub use reconcile::{ExcessPolicy, SyncOptions};
pub use report::{EntityCounts, SyncReport, SyncWriteError};
pub use store::{ModuleStore, StoreError, StoreResult};
