//! The sync orchestrator.
//!
//! Single entry point for propagating a draft template's content into a
//! launched copy. The walk is top-down initiated and bottom-up complete:
//! module-level fields merge first, then week branches run concurrently,
//! then within each week its page branches, then within each page the
//! question / resource / video branches. A parent level is complete only
//! when all of its child branches have finished.
//!
//! Precondition failures are fail-fast and typed; every read happens before
//! the first write, so a failed precondition never leaves a partial
//! mutation. Entity-level write failures during reconciliation are
//! collected into the run's [`SyncReport`] and never abort sibling
//! branches: re-running sync is safe (idempotent), so "sync as much as
//! possible, report the rest" beats all-or-nothing.

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::course::{ModuleStatus, PageTree, QuestionNode, ResourceContent, VideoContent, WeekTree};
use crate::sync::merge;
use crate::sync::reconcile::{self, ExcessPolicy, SyncOptions};
use crate::sync::report::SyncReport;
use crate::sync::store::{ModuleStore, StoreError};
use crate::types::DbId;

/// Why a sync run could not start (or, for `Store`, could not finish its
/// initial reads). Write failures after the run starts are *not* errors at
/// this level; they are collected in the [`SyncReport`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("module {id} has status '{status}', expected '{expected}'")]
    InvalidStatus {
        id: DbId,
        status: ModuleStatus,
        expected: ModuleStatus,
    },

    #[error("module {id} has no template link")]
    NoTemplateLink { id: DbId },

    #[error("module {id} references template {template_id}, which no longer exists")]
    TemplateMissing { id: DbId, template_id: DbId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates one sync run against a [`ModuleStore`].
///
/// Holds no state between runs; every run loads both module trees fresh.
pub struct SyncEngine<'a, S: ModuleStore + ?Sized> {
    store: &'a S,
    options: SyncOptions,
}

impl<'a, S: ModuleStore + ?Sized> SyncEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(store: &'a S, options: SyncOptions) -> Self {
        Self { store, options }
    }

    /// Sync an active module from the template it was launched from.
    ///
    /// Resolves the source via the active module's `template_id` link and
    /// fails with [`SyncError::NoTemplateLink`] / [`SyncError::TemplateMissing`]
    /// when the link is absent or dangling.
    pub async fn sync_from_link(&self, active_id: DbId) -> Result<SyncReport, SyncError> {
        let active = self
            .store
            .get_module(active_id)
            .await?
            .ok_or(SyncError::NotFound {
                entity: "active module",
                id: active_id,
            })?;

        let template_id = active
            .template_id
            .ok_or(SyncError::NoTemplateLink { id: active_id })?;

        if self.store.get_module(template_id).await?.is_none() {
            return Err(SyncError::TemplateMissing {
                id: active_id,
                template_id,
            });
        }

        self.sync_to_active_module(template_id, active_id).await
    }

    /// Propagate `template_id`'s content into `active_id`.
    ///
    /// Preconditions: both modules exist, the template is `draft`, the
    /// target is `launched`. All reads (both module rows, both full week
    /// trees, both zoom records) complete before the first write.
    pub async fn sync_to_active_module(
        &self,
        template_id: DbId,
        active_id: DbId,
    ) -> Result<SyncReport, SyncError> {
        let template = self
            .store
            .get_module(template_id)
            .await?
            .ok_or(SyncError::NotFound {
                entity: "template module",
                id: template_id,
            })?;
        let active = self
            .store
            .get_module(active_id)
            .await?
            .ok_or(SyncError::NotFound {
                entity: "active module",
                id: active_id,
            })?;

        if template.status != ModuleStatus::Draft {
            return Err(SyncError::InvalidStatus {
                id: template_id,
                status: template.status,
                expected: ModuleStatus::Draft,
            });
        }
        if active.status != ModuleStatus::Launched {
            return Err(SyncError::InvalidStatus {
                id: active_id,
                status: active.status,
                expected: ModuleStatus::Launched,
            });
        }

        let template_weeks = self.store.get_weeks(template_id).await?;
        let active_weeks = self.store.get_weeks(active_id).await?;
        let template_zoom = self.store.get_zoom_info(template_id).await?;
        let active_zoom = self.store.get_zoom_info(active_id).await?;

        tracing::info!(
            template_id,
            active_id,
            template_weeks = template_weeks.len(),
            active_weeks = active_weeks.len(),
            "Starting module sync"
        );

        let mut report = SyncReport::default();

        // Module-level fields first: cheap, and nothing below depends on them.
        if merge::module_fields_changed(&template.content, &active.content) {
            match self
                .store
                .update_module_content(active_id, &template.content)
                .await
            {
                Ok(()) => report.modules.updated += 1,
                Err(e) => report.push_error("module", format!("module {active_id}"), e),
            }
        }

        // Zoom metadata is an opaque pass-through, template-owned in full.
        // A template without a zoom record leaves the active one untouched
        // (the store contract has no zoom delete).
        if let Some(zoom) = &template_zoom {
            if active_zoom.as_ref() != Some(zoom) {
                match self.store.upsert_zoom_info(active_id, zoom).await {
                    Ok(()) => report.zoom_updated = true,
                    Err(e) => report.push_error("zoom_info", format!("module {active_id}"), e),
                }
            }
        }

        // Week branches are independent of each other; excess active-only
        // weeks are always preserved (an admin may have added them by hand).
        let part = reconcile::partition_weeks(&template_weeks, &active_weeks);
        for excess in &part.active_only {
            tracing::debug!(week = excess.number, "active-only week preserved");
        }

        let mut branches: Vec<BoxFuture<'_, SyncReport>> = Vec::new();
        for (t, a) in part.matched {
            branches.push(self.sync_matched_week(t, a).boxed());
        }
        for t in part.template_only {
            branches.push(self.create_week(active_id, t).boxed());
        }
        for outcome in join_all(branches).await {
            report.absorb(outcome);
        }

        tracing::info!(
            template_id,
            active_id,
            weeks_updated = report.weeks.updated,
            weeks_created = report.weeks.created,
            pages_updated = report.pages.updated,
            pages_created = report.pages.created,
            questions_updated = report.questions.updated,
            questions_created = report.questions.created,
            errors = report.errors.len(),
            "Module sync finished"
        );

        Ok(report)
    }

    // -- week level ---------------------------------------------------------

    async fn sync_matched_week(&self, t: &WeekTree, a: &WeekTree) -> SyncReport {
        let mut report = SyncReport::default();

        if merge::week_fields_changed(&t.content, &a.content) {
            match self.store.update_week(a.id, &t.content).await {
                Ok(()) => report.weeks.updated += 1,
                Err(e) => report.push_error("week", format!("week {}", t.number), e),
            }
        }

        // Page branches within a week are independent; a failed week-field
        // update above does not block them.
        let part = reconcile::partition_pages(&t.pages, &a.pages);
        let mut branches: Vec<BoxFuture<'_, SyncReport>> = Vec::new();
        for (tp, ap) in part.matched {
            branches.push(self.sync_matched_page(t.number, tp, ap).boxed());
        }
        for tp in part.template_only {
            branches.push(self.create_page(t.number, a.id, tp).boxed());
        }
        for ap in part.active_only {
            match self.options.excess_pages {
                ExcessPolicy::Delete => {
                    branches.push(self.delete_excess_page(t.number, ap).boxed())
                }
                ExcessPolicy::Preserve => {
                    tracing::debug!(
                        week = t.number,
                        position = ap.position,
                        "excess active page preserved by policy"
                    );
                }
            }
        }
        for outcome in join_all(branches).await {
            report.absorb(outcome);
        }
        report
    }

    async fn create_week(&self, module_id: DbId, t: &WeekTree) -> SyncReport {
        let mut report = SyncReport::default();
        let week_id = match self.store.insert_week(module_id, t.number, &t.content).await {
            Ok(id) => {
                report.weeks.created += 1;
                id
            }
            Err(e) => {
                // Without the parent row the whole subtree is unreachable.
                report.push_error("week", format!("week {}", t.number), e);
                return report;
            }
        };
        let branches = t.pages.iter().map(|p| self.create_page(t.number, week_id, p));
        for outcome in join_all(branches).await {
            report.absorb(outcome);
        }
        report
    }

    // -- page level ---------------------------------------------------------

    async fn sync_matched_page(&self, week_number: i32, t: &PageTree, a: &PageTree) -> SyncReport {
        let key = format!("week {week_number} / page {}", t.position);
        let mut report = SyncReport::default();

        if merge::page_fields_changed(&t.content, &a.content) {
            match self.store.update_page(a.id, &t.content).await {
                Ok(()) => report.pages.updated += 1,
                Err(e) => report.push_error("page", key.clone(), e),
            }
        }

        // Questions, resources, and videos touch disjoint rows; the three
        // branches run concurrently with no ordering between them.
        let (questions, resources, videos) = tokio::join!(
            self.sync_questions(&key, t, a),
            self.sync_resources(&key, a.id, &t.resources, &a.resources),
            self.sync_videos(&key, a.id, &t.videos, &a.videos),
        );
        report.absorb(questions);
        report.absorb(resources);
        report.absorb(videos);
        report
    }

    async fn create_page(&self, week_number: i32, week_id: DbId, t: &PageTree) -> SyncReport {
        let key = format!("week {week_number} / page {}", t.position);
        let mut report = SyncReport::default();

        let page_id = match self.store.insert_page(week_id, t.position, &t.content).await {
            Ok(id) => {
                report.pages.created += 1;
                id
            }
            Err(e) => {
                report.push_error("page", key, e);
                return report;
            }
        };

        let questions = async {
            let mut r = SyncReport::default();
            // Inserted in template order so ordinal numbers line up.
            for tq in &t.questions {
                match self.store.insert_question(page_id, tq.number, &tq.text).await {
                    Ok(_) => r.questions.created += 1,
                    Err(e) => r.push_error(
                        "question",
                        format!("week {week_number} / page {} / question {}", t.position, tq.number),
                        e,
                    ),
                }
            }
            r
        };
        let resources = self.sync_resources(&key, page_id, &t.resources, &[]);
        let videos = self.sync_videos(&key, page_id, &t.videos, &[]);

        let (q, r, v) = tokio::join!(questions, resources, videos);
        report.absorb(q);
        report.absorb(r);
        report.absorb(v);
        report
    }

    async fn delete_excess_page(&self, week_number: i32, a: &PageTree) -> SyncReport {
        let mut report = SyncReport::default();
        match self.store.delete_page(a.id).await {
            Ok(()) => report.pages.deleted += 1,
            Err(e) => report.push_error(
                "page",
                format!("week {week_number} / page {}", a.position),
                e,
            ),
        }
        report
    }

    // -- question / resource / video level ----------------------------------

    async fn sync_questions(&self, page_key: &str, t: &PageTree, a: &PageTree) -> SyncReport {
        let part = reconcile::partition_questions(&t.questions, &a.questions);
        let mut branches: Vec<BoxFuture<'_, SyncReport>> = Vec::new();

        for (tq, aq) in part.matched {
            if !merge::question_text_changed(&tq.text, &aq.text) {
                continue;
            }
            branches.push(
                async move {
                    let mut r = SyncReport::default();
                    // Text updates in place; the row keeps its identity so
                    // attached discussion posts stay anchored.
                    match self.store.update_question(aq.id, &tq.text).await {
                        Ok(()) => r.questions.updated += 1,
                        Err(e) => r.push_error(
                            "question",
                            format!("{page_key} / question {}", tq.number),
                            e,
                        ),
                    }
                    r
                }
                .boxed(),
            );
        }

        for tq in part.template_only {
            branches.push(
                async move {
                    let mut r = SyncReport::default();
                    match self.store.insert_question(a.id, tq.number, &tq.text).await {
                        Ok(_) => r.questions.created += 1,
                        Err(e) => r.push_error(
                            "question",
                            format!("{page_key} / question {}", tq.number),
                            e,
                        ),
                    }
                    r
                }
                .boxed(),
            );
        }

        for aq in part.active_only {
            if self.options.excess_questions == ExcessPolicy::Preserve {
                continue;
            }
            branches.push(self.delete_excess_question(page_key, aq).boxed());
        }

        let mut report = SyncReport::default();
        for outcome in join_all(branches).await {
            report.absorb(outcome);
        }
        report
    }

    async fn delete_excess_question(&self, page_key: &str, aq: &QuestionNode) -> SyncReport {
        let mut report = SyncReport::default();
        // Hard invariant, independent of policy: a question with discussion
        // posts is never deleted. Removing it would cascade student posts.
        if aq.post_count > 0 {
            tracing::debug!(
                question_id = aq.id,
                posts = aq.post_count,
                "excess question kept; it has discussion posts"
            );
            return report;
        }
        match self.store.delete_question(aq.id).await {
            Ok(()) => report.questions.deleted += 1,
            Err(e) => report.push_error(
                "question",
                format!("{page_key} / question {}", aq.number),
                e,
            ),
        }
        report
    }

    async fn sync_resources(
        &self,
        page_key: &str,
        page_id: DbId,
        template: &[ResourceContent],
        active: &[ResourceContent],
    ) -> SyncReport {
        let mut report = SyncReport::default();
        if merge::resources_equal(template, active) {
            return report;
        }
        match self.store.replace_resources(page_id, template).await {
            Ok(()) => report.resources_replaced += 1,
            Err(e) => report.push_error("resources", page_key.to_string(), e),
        }
        report
    }

    async fn sync_videos(
        &self,
        page_key: &str,
        page_id: DbId,
        template: &[VideoContent],
        active: &[VideoContent],
    ) -> SyncReport {
        let mut report = SyncReport::default();
        if merge::videos_equal(template, active) {
            return report;
        }
        match self.store.replace_videos(page_id, template).await {
            Ok(()) => report.videos_replaced += 1,
            Err(e) => report.push_error("videos", page_key.to_string(), e),
        }
        report
    }
}
