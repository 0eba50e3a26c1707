//! Scheduled backup worker.
//!
//! Exports the full course dataset (modules with their content trees,
//! discussion threads, and progress records) to timestamped JSON files on a
//! fixed interval, records each run in `backup_runs`, and prunes files past
//! the retention window. Restore is a manual operation on the exported
//! files and is out of scope here.

pub mod backup;
