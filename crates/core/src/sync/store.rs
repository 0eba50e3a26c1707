//! The narrow storage contract the sync engine runs against.

use async_trait::async_trait;

use crate::course::{
    ModuleContent, ModuleRecord, PageContent, ResourceContent, VideoContent, WeekContent, WeekTree,
};
use crate::types::DbId;

/// Error returned by a [`ModuleStore`] implementation.
///
/// Carries a human-readable message and, when available, the underlying
/// driver error as a source. The engine never inspects the message; it only
/// records it in the run report.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Per-entity CRUD the engine consumes, as an async trait.
///
/// The contract describes storage semantics, not any particular database
/// product:
///
/// - Reads return owned value objects; nothing is cached between calls.
/// - `get_weeks` returns the full nested tree (pages, questions with post
///   counts, resources, videos), ordered by week number / page position /
///   question number / sort order.
/// - Updates touch only the template-owned fields carried by the given
///   content struct. Row identity and active-owned fields are untouched.
/// - `replace_resources` / `replace_videos` are delete-all-insert-fresh for
///   one page.
/// - Deletes cascade to children (a page delete removes its questions,
///   resources, and videos; a question delete removes its posts). The engine
///   is responsible for never deleting a question that still has posts.
#[async_trait]
pub trait ModuleStore: Send + Sync {
    async fn get_module(&self, id: DbId) -> StoreResult<Option<ModuleRecord>>;

    async fn get_weeks(&self, module_id: DbId) -> StoreResult<Vec<WeekTree>>;

    async fn update_module_content(
        &self,
        module_id: DbId,
        content: &ModuleContent,
    ) -> StoreResult<()>;

    async fn get_zoom_info(&self, module_id: DbId) -> StoreResult<Option<serde_json::Value>>;

    async fn upsert_zoom_info(&self, module_id: DbId, data: &serde_json::Value)
        -> StoreResult<()>;

    async fn insert_week(
        &self,
        module_id: DbId,
        number: i32,
        content: &WeekContent,
    ) -> StoreResult<DbId>;

    async fn update_week(&self, week_id: DbId, content: &WeekContent) -> StoreResult<()>;

    async fn insert_page(
        &self,
        week_id: DbId,
        position: i32,
        content: &PageContent,
    ) -> StoreResult<DbId>;

    async fn update_page(&self, page_id: DbId, content: &PageContent) -> StoreResult<()>;

    async fn delete_page(&self, page_id: DbId) -> StoreResult<()>;

    async fn insert_question(&self, page_id: DbId, number: i32, text: &str) -> StoreResult<DbId>;

    async fn update_question(&self, question_id: DbId, text: &str) -> StoreResult<()>;

    async fn delete_question(&self, question_id: DbId) -> StoreResult<()>;

    async fn replace_resources(
        &self,
        page_id: DbId,
        items: &[ResourceContent],
    ) -> StoreResult<()>;

    async fn replace_videos(&self, page_id: DbId, items: &[VideoContent]) -> StoreResult<()>;
}
