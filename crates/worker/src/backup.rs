//! Backup runner: periodic JSON export with retention pruning.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use lectern_core::sync::{ModuleStore, StoreError};
use lectern_db::repositories::{BackupRepo, DiscussionRepo, ModuleRepo, ProgressRepo};
use lectern_db::sync_store::PgModuleStore;
use lectern_db::DbPool;
use tokio_util::sync::CancellationToken;

/// File name prefix and suffix for backup exports.
const FILE_PREFIX: &str = "lectern-backup-";
const FILE_SUFFIX: &str = ".json";

/// Timestamp layout embedded in backup file names.
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Configuration for the backup worker, loaded from environment variables.
///
/// | Env Var                 | Default     |
/// |-------------------------|-------------|
/// | `BACKUP_DIR`            | `./backups` |
/// | `BACKUP_INTERVAL_SECS`  | `86400`     |
/// | `BACKUP_RETENTION_DAYS` | `30`        |
#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub dir: PathBuf,
    pub interval_secs: u64,
    pub retention_days: i64,
}

impl BackupConfig {
    pub fn from_env() -> Self {
        let dir = std::env::var("BACKUP_DIR").unwrap_or_else(|_| "./backups".into());
        let interval_secs: u64 = std::env::var("BACKUP_INTERVAL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("BACKUP_INTERVAL_SECS must be a valid u64");
        let retention_days: i64 = std::env::var("BACKUP_RETENTION_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("BACKUP_RETENTION_DAYS must be a valid i64");
        Self {
            dir: PathBuf::from(dir),
            interval_secs,
            retention_days,
        }
    }
}

/// Why a backup run failed.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of one successful backup run.
#[derive(Debug)]
pub struct BackupOutcome {
    pub file_path: PathBuf,
    pub module_count: usize,
    pub pruned_files: usize,
}

/// Periodic backup runner. Created once and driven by [`run`](Self::run).
pub struct BackupRunner {
    pool: DbPool,
    config: BackupConfig,
}

impl BackupRunner {
    pub fn new(pool: DbPool, config: BackupConfig) -> Self {
        Self { pool, config }
    }

    /// Run the backup loop until `cancel` is triggered. The first export
    /// happens immediately on startup (the interval's first tick fires at
    /// once), then every `interval_secs`.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            dir = %self.config.dir.display(),
            interval_secs = self.config.interval_secs,
            retention_days = self.config.retention_days,
            "Backup worker started"
        );

        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Backup worker stopping");
                    break;
                }
                _ = interval.tick() => {
                    match self.run_once().await {
                        Ok(outcome) => {
                            tracing::info!(
                                file = %outcome.file_path.display(),
                                modules = outcome.module_count,
                                pruned = outcome.pruned_files,
                                "Backup completed"
                            );
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Backup failed");
                        }
                    }
                }
            }
        }
    }

    /// Perform one backup: export, record the run, prune old files.
    pub async fn run_once(&self) -> Result<BackupOutcome, BackupError> {
        let run = BackupRepo::start(&self.pool).await?;

        match self.export().await {
            Ok((file_path, module_count)) => {
                BackupRepo::finish_success(
                    &self.pool,
                    run.id,
                    &file_path.to_string_lossy(),
                    module_count as i32,
                )
                .await?;

                let cutoff = Utc::now() - chrono::Duration::days(self.config.retention_days);
                let pruned_files = prune_backup_dir(&self.config.dir, cutoff)?;

                Ok(BackupOutcome {
                    file_path,
                    module_count,
                    pruned_files,
                })
            }
            Err(e) => {
                // Best effort: the failure itself is what we want to surface.
                if let Err(record_err) =
                    BackupRepo::finish_failure(&self.pool, run.id, &e.to_string()).await
                {
                    tracing::error!(error = %record_err, "Failed to record backup failure");
                }
                Err(e)
            }
        }
    }

    /// Export every module's full dataset to a timestamped JSON file.
    async fn export(&self) -> Result<(PathBuf, usize), BackupError> {
        let store = PgModuleStore::new(self.pool.clone());
        let modules = ModuleRepo::list(&self.pool, None).await?;

        let mut entries = Vec::with_capacity(modules.len());
        for module in &modules {
            let weeks = store.get_weeks(module.id).await?;
            let zoom = store.get_zoom_info(module.id).await?;

            let mut discussions = Vec::new();
            let mut progress = Vec::new();
            for week in &weeks {
                progress.extend(ProgressRepo::list_by_week(&self.pool, week.id).await?);
                for page in &week.pages {
                    for question in &page.questions {
                        if question.post_count > 0 {
                            let posts =
                                DiscussionRepo::list_by_question(&self.pool, question.id).await?;
                            discussions.push(serde_json::json!({
                                "question_id": question.id,
                                "posts": posts,
                            }));
                        }
                    }
                }
            }

            entries.push(serde_json::json!({
                "module": module,
                "zoom": zoom,
                "weeks": weeks,
                "discussions": discussions,
                "progress": progress,
            }));
        }

        let document = serde_json::json!({
            "exported_at": Utc::now(),
            "modules": entries,
        });

        tokio::fs::create_dir_all(&self.config.dir).await?;
        let file_path = self.config.dir.join(backup_file_name(Utc::now()));
        let body = serde_json::to_vec_pretty(&document)?;
        tokio::fs::write(&file_path, body).await?;

        Ok((file_path, modules.len()))
    }
}

/// Timestamped backup file name, e.g. `lectern-backup-20260301120000.json`.
pub fn backup_file_name(at: DateTime<Utc>) -> String {
    format!(
        "{FILE_PREFIX}{}{FILE_SUFFIX}",
        at.format(FILE_TIMESTAMP_FORMAT)
    )
}

/// Extract the timestamp from a backup file name. Returns `None` for files
/// that do not match the backup naming scheme (they are never pruned).
pub fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    let naive = NaiveDateTime::parse_from_str(stem, FILE_TIMESTAMP_FORMAT).ok()?;
    Some(naive.and_utc())
}

/// Delete backup files older than `cutoff`. Returns the number removed.
/// Unrecognized files in the directory are left alone.
pub fn prune_backup_dir(dir: &Path, cutoff: DateTime<Utc>) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut pruned = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(stamp) = parse_backup_timestamp(name) else {
            continue;
        };
        if stamp < cutoff {
            std::fs::remove_file(entry.path())?;
            pruned += 1;
        }
    }
    Ok(pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_embeds_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(backup_file_name(at), "lectern-backup-20260301120000.json");
    }

    #[test]
    fn timestamp_roundtrips_through_file_name() {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 23, 59, 59).unwrap();
        let name = backup_file_name(at);
        assert_eq!(parse_backup_timestamp(&name), Some(at));
    }

    #[test]
    fn foreign_files_are_not_parsed() {
        assert!(parse_backup_timestamp("notes.txt").is_none());
        assert!(parse_backup_timestamp("lectern-backup-garbage.json").is_none());
        assert!(parse_backup_timestamp("lectern-backup-20260301.json").is_none());
    }

    #[test]
    fn prune_removes_only_expired_backup_files() {
        let dir = tempfile::tempdir().unwrap();
        let old = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        let old_path = dir.path().join(backup_file_name(old));
        let new_path = dir.path().join(backup_file_name(new));
        let foreign_path = dir.path().join("README.txt");
        std::fs::write(&old_path, "{}").unwrap();
        std::fs::write(&new_path, "{}").unwrap();
        std::fs::write(&foreign_path, "keep me").unwrap();

        let pruned = prune_backup_dir(dir.path(), cutoff).unwrap();

        assert_eq!(pruned, 1);
        assert!(!old_path.exists());
        assert!(new_path.exists());
        assert!(foreign_path.exists());
    }

    #[test]
    fn prune_on_missing_dir_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let cutoff = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(prune_backup_dir(&missing, cutoff).unwrap(), 0);
    }
}
