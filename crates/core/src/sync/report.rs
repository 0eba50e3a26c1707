//! Structured result of a sync run.

use serde::Serialize;

use crate::sync::store::StoreError;

/// Updated/created/deleted tallies for one entity type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub updated: u32,
    pub created: u32,
    pub deleted: u32,
}

/// One failed entity-level write, recorded without aborting sibling work.
#[derive(Debug, Clone, Serialize)]
pub struct SyncWriteError {
    /// Entity type the write targeted (`"module"`, `"week"`, ...).
    pub entity: &'static str,
    /// Human-readable position of the entity in the hierarchy,
    /// e.g. `"week 2 / page 0 / question 3"`.
    pub key: String,
    pub message: String,
}

/// Summary of a completed sync run.
///
/// A run that returns a report always executed its preconditions; whether
/// every entity write landed is [`ran_clean`](SyncReport::ran_clean). The
/// caller distinguishes "did not run" (a `SyncError`) from "ran with
/// partial errors" from "ran cleanly".
#[derive(Debug, Default, Clone, Serialize)]
pub struct SyncReport {
    pub modules: EntityCounts,
    pub weeks: EntityCounts,
    pub pages: EntityCounts,
    pub questions: EntityCounts,
    /// Number of pages whose resource collection was rewritten.
    pub resources_replaced: u32,
    /// Number of pages whose video collection was rewritten.
    pub videos_replaced: u32,
    pub zoom_updated: bool,
    pub errors: Vec<SyncWriteError>,
}

impl SyncReport {
    /// True when every attempted write succeeded.
    pub fn ran_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when the run performed no writes at all (a fully idempotent
    /// re-run of an already-synced pair).
    pub fn is_noop(&self) -> bool {
        self.modules == EntityCounts::default()
            && self.weeks == EntityCounts::default()
            && self.pages == EntityCounts::default()
            && self.questions == EntityCounts::default()
            && self.resources_replaced == 0
            && self.videos_replaced == 0
            && !self.zoom_updated
            && self.errors.is_empty()
    }

    /// Fold a child branch's outcome into this report.
    pub fn absorb(&mut self, other: SyncReport) {
        self.modules.updated += other.modules.updated;
        self.modules.created += other.modules.created;
        self.modules.deleted += other.modules.deleted;
        self.weeks.updated += other.weeks.updated;
        self.weeks.created += other.weeks.created;
        self.weeks.deleted += other.weeks.deleted;
        self.pages.updated += other.pages.updated;
        self.pages.created += other.pages.created;
        self.pages.deleted += other.pages.deleted;
        self.questions.updated += other.questions.updated;
        self.questions.created += other.questions.created;
        self.questions.deleted += other.questions.deleted;
        self.resources_replaced += other.resources_replaced;
        self.videos_replaced += other.videos_replaced;
        self.zoom_updated |= other.zoom_updated;
        self.errors.extend(other.errors);
    }

    pub(crate) fn push_error(&mut self, entity: &'static str, key: String, error: StoreError) {
        self.errors.push(SyncWriteError {
            entity,
            key,
            message: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_report_is_clean_noop() {
        let report = SyncReport::default();
        assert!(report.ran_clean());
        assert!(report.is_noop());
    }

    #[test]
    fn absorb_accumulates_counts_and_errors() {
        let mut parent = SyncReport::default();
        let mut child = SyncReport::default();
        child.weeks.created = 2;
        child.questions.updated = 1;
        child.push_error("week", "week 3".into(), StoreError::new("boom"));

        parent.absorb(child);

        assert_eq!(parent.weeks.created, 2);
        assert_eq!(parent.questions.updated, 1);
        assert_eq!(parent.errors.len(), 1);
        assert!(!parent.ran_clean());
        assert!(!parent.is_noop());
    }
}
