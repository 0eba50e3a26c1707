//! In-memory [`ModuleStore`] reference backend.
//!
//! Used by the engine's tests (and usable by any caller that wants a
//! throwaway store): seeds fixtures, logs every mutating operation so
//! idempotence is observable at the storage layer, and injects failures
//! per operation name for partial-failure scenarios. Discussion posts and
//! progress records are represented so the non-destruction invariants can
//! be asserted — the engine itself never reads or writes them, but a
//! cascading delete here would make their loss visible.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::course::{
    ModuleContent, ModuleRecord, ModuleStatus, PageContent, PageTree, QuestionNode,
    ResourceContent, VideoContent, WeekContent, WeekTree,
};
use crate::sync::store::{ModuleStore, StoreError, StoreResult};
use crate::types::DbId;

/// A discussion post as seeded into the memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPost {
    pub id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
}

/// A progress record as seeded into the memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedProgress {
    pub user_id: DbId,
    pub week_id: DbId,
    pub current_page: i32,
    pub completed: bool,
}

#[derive(Debug)]
struct MemQuestion {
    id: DbId,
    number: i32,
    text: String,
}

#[derive(Debug)]
struct MemPage {
    id: DbId,
    position: i32,
    content: PageContent,
    questions: Vec<MemQuestion>,
    resources: Vec<ResourceContent>,
    videos: Vec<VideoContent>,
}

#[derive(Debug)]
struct MemWeek {
    id: DbId,
    number: i32,
    content: WeekContent,
    pages: Vec<MemPage>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: DbId,
    modules: HashMap<DbId, ModuleRecord>,
    zoom: HashMap<DbId, serde_json::Value>,
    /// module id -> its weeks
    weeks: HashMap<DbId, Vec<MemWeek>>,
    /// question id -> its posts
    posts: HashMap<DbId, Vec<SeedPost>>,
    /// (user id, week id) -> progress
    progress: HashMap<(DbId, DbId), SeedProgress>,
    /// log of every mutating store operation, as `"op:key"`
    writes: Vec<String>,
    /// operation names that fail on invocation
    fail_ops: Vec<String>,
}

impl Inner {
    fn alloc(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, op: &str, key: impl std::fmt::Display) -> StoreResult<()> {
        if self.fail_ops.iter().any(|f| f == op) {
            return Err(StoreError::new(format!("injected failure for {op}")));
        }
        self.writes.push(format!("{op}:{key}"));
        Ok(())
    }

    fn week_mut(&mut self, week_id: DbId) -> StoreResult<&mut MemWeek> {
        self.weeks
            .values_mut()
            .flat_map(|ws| ws.iter_mut())
            .find(|w| w.id == week_id)
            .ok_or_else(|| StoreError::new(format!("week {week_id} not found")))
    }

    fn page_mut(&mut self, page_id: DbId) -> StoreResult<&mut MemPage> {
        self.weeks
            .values_mut()
            .flat_map(|ws| ws.iter_mut())
            .flat_map(|w| w.pages.iter_mut())
            .find(|p| p.id == page_id)
            .ok_or_else(|| StoreError::new(format!("page {page_id} not found")))
    }
}

/// In-memory store. Cheap to create per test.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- fixture seeding (not logged as writes) -----------------------------

    pub async fn add_module(
        &self,
        content: ModuleContent,
        status: ModuleStatus,
        template_id: Option<DbId>,
    ) -> DbId {
        let mut inner = self.inner.lock().await;
        let id = inner.alloc();
        inner.modules.insert(
            id,
            ModuleRecord {
                id,
                content,
                status,
                template_id,
                launched_at: None,
                archived_at: None,
            },
        );
        inner.weeks.entry(id).or_default();
        id
    }

    pub async fn add_week(&self, module_id: DbId, number: i32, content: WeekContent) -> DbId {
        let mut inner = self.inner.lock().await;
        let id = inner.alloc();
        inner.weeks.entry(module_id).or_default().push(MemWeek {
            id,
            number,
            content,
            pages: vec![],
        });
        id
    }

    pub async fn add_page(&self, week_id: DbId, position: i32, content: PageContent) -> DbId {
        let mut inner = self.inner.lock().await;
        let id = inner.alloc();
        let week = inner.week_mut(week_id).expect("seed: week must exist");
        week.pages.push(MemPage {
            id,
            position,
            content,
            questions: vec![],
            resources: vec![],
            videos: vec![],
        });
        id
    }

    pub async fn add_question(&self, page_id: DbId, number: i32, text: &str) -> DbId {
        let mut inner = self.inner.lock().await;
        let id = inner.alloc();
        let page = inner.page_mut(page_id).expect("seed: page must exist");
        page.questions.push(MemQuestion {
            id,
            number,
            text: text.to_string(),
        });
        id
    }

    pub async fn set_resources(&self, page_id: DbId, items: Vec<ResourceContent>) {
        let mut inner = self.inner.lock().await;
        inner.page_mut(page_id).expect("seed: page must exist").resources = items;
    }

    pub async fn set_videos(&self, page_id: DbId, items: Vec<VideoContent>) {
        let mut inner = self.inner.lock().await;
        inner.page_mut(page_id).expect("seed: page must exist").videos = items;
    }

    pub async fn add_post(
        &self,
        question_id: DbId,
        user_id: DbId,
        parent_id: Option<DbId>,
        content: &str,
    ) -> DbId {
        let mut inner = self.inner.lock().await;
        let id = inner.alloc();
        inner.posts.entry(question_id).or_default().push(SeedPost {
            id,
            user_id,
            parent_id,
            content: content.to_string(),
        });
        id
    }

    pub async fn add_progress(
        &self,
        user_id: DbId,
        week_id: DbId,
        current_page: i32,
        completed: bool,
    ) {
        let mut inner = self.inner.lock().await;
        inner.progress.insert(
            (user_id, week_id),
            SeedProgress {
                user_id,
                week_id,
                current_page,
                completed,
            },
        );
    }

    pub async fn set_zoom(&self, module_id: DbId, data: serde_json::Value) {
        let mut inner = self.inner.lock().await;
        inner.zoom.insert(module_id, data);
    }

    // -- failure injection and inspection -----------------------------------

    /// Make every subsequent invocation of `op` (e.g. `"update_week"`) fail.
    pub async fn fail_on(&self, op: &str) {
        self.inner.lock().await.fail_ops.push(op.to_string());
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        self.inner.lock().await.fail_ops.clear();
    }

    /// Every mutating store operation performed so far, as `"op:key"`.
    pub async fn writes(&self) -> Vec<String> {
        self.inner.lock().await.writes.clone()
    }

    pub async fn write_count(&self) -> usize {
        self.inner.lock().await.writes.len()
    }

    pub async fn clear_writes(&self) {
        self.inner.lock().await.writes.clear();
    }

    pub async fn posts_for(&self, question_id: DbId) -> Vec<SeedPost> {
        self.inner
            .lock()
            .await
            .posts
            .get(&question_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn progress_for(&self, user_id: DbId, week_id: DbId) -> Option<SeedProgress> {
        self.inner.lock().await.progress.get(&(user_id, week_id)).cloned()
    }

    pub async fn zoom_of(&self, module_id: DbId) -> Option<serde_json::Value> {
        self.inner.lock().await.zoom.get(&module_id).cloned()
    }
}

#[async_trait]
impl ModuleStore for MemoryStore {
    async fn get_module(&self, id: DbId) -> StoreResult<Option<ModuleRecord>> {
        Ok(self.inner.lock().await.modules.get(&id).cloned())
    }

    async fn get_weeks(&self, module_id: DbId) -> StoreResult<Vec<WeekTree>> {
        let inner = self.inner.lock().await;
        let Some(weeks) = inner.weeks.get(&module_id) else {
            return Ok(vec![]);
        };
        let mut out: Vec<WeekTree> = weeks
            .iter()
            .map(|w| {
                let mut pages: Vec<PageTree> = w
                    .pages
                    .iter()
                    .map(|p| {
                        let mut questions: Vec<QuestionNode> = p
                            .questions
                            .iter()
                            .map(|q| QuestionNode {
                                id: q.id,
                                number: q.number,
                                text: q.text.clone(),
                                post_count: inner
                                    .posts
                                    .get(&q.id)
                                    .map(|ps| ps.len() as i64)
                                    .unwrap_or(0),
                            })
                            .collect();
                        questions.sort_by_key(|q| q.number);
                        let mut resources = p.resources.clone();
                        resources.sort_by_key(|r| r.sort_order);
                        let mut videos = p.videos.clone();
                        videos.sort_by_key(|v| v.sort_order);
                        PageTree {
                            id: p.id,
                            position: p.position,
                            content: p.content.clone(),
                            questions,
                            resources,
                            videos,
                        }
                    })
                    .collect();
                pages.sort_by_key(|p| p.position);
                WeekTree {
                    id: w.id,
                    number: w.number,
                    content: w.content.clone(),
                    pages,
                }
            })
            .collect();
        out.sort_by_key(|w| w.number);
        Ok(out)
    }

    async fn update_module_content(
        &self,
        module_id: DbId,
        content: &ModuleContent,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if !inner.modules.contains_key(&module_id) {
            return Err(StoreError::new(format!("module {module_id} not found")));
        }
        inner.record("update_module", module_id)?;
        if let Some(module) = inner.modules.get_mut(&module_id) {
            module.content = content.clone();
        }
        Ok(())
    }

    async fn get_zoom_info(&self, module_id: DbId) -> StoreResult<Option<serde_json::Value>> {
        Ok(self.inner.lock().await.zoom.get(&module_id).cloned())
    }

    async fn upsert_zoom_info(
        &self,
        module_id: DbId,
        data: &serde_json::Value,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.record("upsert_zoom", module_id)?;
        inner.zoom.insert(module_id, data.clone());
        Ok(())
    }

    async fn insert_week(
        &self,
        module_id: DbId,
        number: i32,
        content: &WeekContent,
    ) -> StoreResult<DbId> {
        let mut inner = self.inner.lock().await;
        if !inner.modules.contains_key(&module_id) {
            return Err(StoreError::new(format!("module {module_id} not found")));
        }
        let duplicate = inner
            .weeks
            .get(&module_id)
            .is_some_and(|ws| ws.iter().any(|w| w.number == number));
        if duplicate {
            return Err(StoreError::new(format!(
                "unique violation: uq_weeks_module_number ({module_id}, {number})"
            )));
        }
        inner.record("insert_week", format!("{module_id}/{number}"))?;
        let id = inner.alloc();
        inner.weeks.entry(module_id).or_default().push(MemWeek {
            id,
            number,
            content: content.clone(),
            pages: vec![],
        });
        Ok(id)
    }

    async fn update_week(&self, week_id: DbId, content: &WeekContent) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.week_mut(week_id)?;
        inner.record("update_week", week_id)?;
        inner.week_mut(week_id)?.content = content.clone();
        Ok(())
    }

    async fn insert_page(
        &self,
        week_id: DbId,
        position: i32,
        content: &PageContent,
    ) -> StoreResult<DbId> {
        let mut inner = self.inner.lock().await;
        inner.week_mut(week_id)?;
        inner.record("insert_page", format!("{week_id}/{position}"))?;
        let id = inner.alloc();
        inner.week_mut(week_id)?.pages.push(MemPage {
            id,
            position,
            content: content.clone(),
            questions: vec![],
            resources: vec![],
            videos: vec![],
        });
        Ok(id)
    }

    async fn update_page(&self, page_id: DbId, content: &PageContent) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.page_mut(page_id)?;
        inner.record("update_page", page_id)?;
        inner.page_mut(page_id)?.content = content.clone();
        Ok(())
    }

    async fn delete_page(&self, page_id: DbId) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.record("delete_page", page_id)?;
        let mut removed_questions = Vec::new();
        for weeks in inner.weeks.values_mut() {
            for week in weeks.iter_mut() {
                if let Some(idx) = week.pages.iter().position(|p| p.id == page_id) {
                    let page = week.pages.remove(idx);
                    removed_questions.extend(page.questions.iter().map(|q| q.id));
                }
            }
        }
        // Cascade: posts anchored to the removed page's questions disappear.
        for qid in removed_questions {
            inner.posts.remove(&qid);
        }
        Ok(())
    }

    async fn insert_question(
        &self,
        page_id: DbId,
        number: i32,
        text: &str,
    ) -> StoreResult<DbId> {
        let mut inner = self.inner.lock().await;
        if inner.page_mut(page_id)?.questions.iter().any(|q| q.number == number) {
            return Err(StoreError::new(format!(
                "unique violation: uq_questions_page_number ({page_id}, {number})"
            )));
        }
        inner.record("insert_question", format!("{page_id}/{number}"))?;
        let id = inner.alloc();
        inner.page_mut(page_id)?.questions.push(MemQuestion {
            id,
            number,
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn update_question(&self, question_id: DbId, text: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let exists = inner
            .weeks
            .values()
            .flat_map(|ws| ws.iter())
            .flat_map(|w| w.pages.iter())
            .flat_map(|p| p.questions.iter())
            .any(|q| q.id == question_id);
        if !exists {
            return Err(StoreError::new(format!("question {question_id} not found")));
        }
        inner.record("update_question", question_id)?;
        if let Some(question) = inner
            .weeks
            .values_mut()
            .flat_map(|ws| ws.iter_mut())
            .flat_map(|w| w.pages.iter_mut())
            .flat_map(|p| p.questions.iter_mut())
            .find(|q| q.id == question_id)
        {
            question.text = text.to_string();
        }
        Ok(())
    }

    async fn delete_question(&self, question_id: DbId) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.record("delete_question", question_id)?;
        for weeks in inner.weeks.values_mut() {
            for week in weeks.iter_mut() {
                for page in week.pages.iter_mut() {
                    page.questions.retain(|q| q.id != question_id);
                }
            }
        }
        // Cascade: posts anchored to the question disappear with it.
        inner.posts.remove(&question_id);
        Ok(())
    }

    async fn replace_resources(
        &self,
        page_id: DbId,
        items: &[ResourceContent],
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.page_mut(page_id)?;
        inner.record("replace_resources", page_id)?;
        inner.page_mut(page_id)?.resources = items.to_vec();
        Ok(())
    }

    async fn replace_videos(&self, page_id: DbId, items: &[VideoContent]) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.page_mut(page_id)?;
        inner.record("replace_videos", page_id)?;
        inner.page_mut(page_id)?.videos = items.to_vec();
        Ok(())
    }
}
