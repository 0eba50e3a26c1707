//! PostgreSQL backend for the sync engine's [`ModuleStore`] contract.
//!
//! Thin adapter over the repositories: loads value objects, converts rows
//! to the engine's tree types, and maps driver errors into [`StoreError`]
//! with context.

use async_trait::async_trait;
use lectern_core::course::{
    ModuleContent, ModuleRecord, PageContent, PageTree, QuestionNode, ResourceContent,
    VideoContent, WeekContent, WeekTree,
};
use lectern_core::sync::{ModuleStore, StoreError, StoreResult};
use lectern_core::types::DbId;

use crate::models::page::CreatePage;
use crate::models::question::CreateQuestion;
use crate::models::week::CreateWeek;
use crate::repositories::{
    ModuleRepo, PageRepo, QuestionRepo, ResourceRepo, VideoRepo, WeekRepo, ZoomRepo,
};
use crate::DbPool;

/// [`ModuleStore`] implementation over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgModuleStore {
    pool: DbPool,
}

impl PgModuleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn db_err(context: &str, error: sqlx::Error) -> StoreError {
    StoreError::with_source(format!("{context}: {error}"), error)
}

#[async_trait]
impl ModuleStore for PgModuleStore {
    async fn get_module(&self, id: DbId) -> StoreResult<Option<ModuleRecord>> {
        let row = ModuleRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| db_err("load module", e))?;
        match row {
            None => Ok(None),
            Some(module) => module
                .to_record()
                .map(Some)
                .ok_or_else(|| StoreError::new(format!("module {id} has unknown status"))),
        }
    }

    async fn get_weeks(&self, module_id: DbId) -> StoreResult<Vec<WeekTree>> {
        let weeks = WeekRepo::list_by_module(&self.pool, module_id)
            .await
            .map_err(|e| db_err("load weeks", e))?;

        let mut trees = Vec::with_capacity(weeks.len());
        for week in weeks {
            let pages = PageRepo::list_by_week(&self.pool, week.id)
                .await
                .map_err(|e| db_err("load pages", e))?;

            let mut page_trees = Vec::with_capacity(pages.len());
            for page in pages {
                let (questions, resources, videos) = tokio::join!(
                    QuestionRepo::list_with_post_counts(&self.pool, page.id),
                    ResourceRepo::list_by_page(&self.pool, page.id),
                    VideoRepo::list_by_page(&self.pool, page.id),
                );
                let questions = questions.map_err(|e| db_err("load questions", e))?;
                let resources = resources.map_err(|e| db_err("load resources", e))?;
                let videos = videos.map_err(|e| db_err("load videos", e))?;

                let content = page.content().ok_or_else(|| {
                    StoreError::new(format!("page {} has unknown kind", page.id))
                })?;
                page_trees.push(PageTree {
                    id: page.id,
                    position: page.position,
                    content,
                    questions: questions
                        .into_iter()
                        .map(|q| QuestionNode {
                            id: q.id,
                            number: q.number,
                            text: q.text,
                            post_count: q.post_count,
                        })
                        .collect(),
                    resources: resources.iter().map(|r| r.content()).collect(),
                    videos: videos.iter().map(|v| v.content()).collect(),
                });
            }

            trees.push(WeekTree {
                id: week.id,
                number: week.number,
                content: week.content(),
                pages: page_trees,
            });
        }
        tracing::debug!(module_id, weeks = trees.len(), "Loaded module content tree");
        Ok(trees)
    }

    async fn update_module_content(
        &self,
        module_id: DbId,
        content: &ModuleContent,
    ) -> StoreResult<()> {
        let updated = ModuleRepo::overwrite_content(&self.pool, module_id, content)
            .await
            .map_err(|e| db_err("update module", e))?;
        if updated {
            Ok(())
        } else {
            Err(StoreError::new(format!("module {module_id} not found")))
        }
    }

    async fn get_zoom_info(&self, module_id: DbId) -> StoreResult<Option<serde_json::Value>> {
        ZoomRepo::get(&self.pool, module_id)
            .await
            .map_err(|e| db_err("load zoom info", e))
    }

    async fn upsert_zoom_info(
        &self,
        module_id: DbId,
        data: &serde_json::Value,
    ) -> StoreResult<()> {
        ZoomRepo::upsert(&self.pool, module_id, data)
            .await
            .map(|_| ())
            .map_err(|e| db_err("upsert zoom info", e))
    }

    async fn insert_week(
        &self,
        module_id: DbId,
        number: i32,
        content: &WeekContent,
    ) -> StoreResult<DbId> {
        let input = CreateWeek {
            number,
            title: content.title.clone(),
            description: content.description.clone(),
            unlock_date: content.unlock_date,
        };
        WeekRepo::create(&self.pool, module_id, &input)
            .await
            .map(|w| w.id)
            .map_err(|e| db_err("insert week", e))
    }

    async fn update_week(&self, week_id: DbId, content: &WeekContent) -> StoreResult<()> {
        let updated = WeekRepo::overwrite_content(&self.pool, week_id, content)
            .await
            .map_err(|e| db_err("update week", e))?;
        if updated {
            Ok(())
        } else {
            Err(StoreError::new(format!("week {week_id} not found")))
        }
    }

    async fn insert_page(
        &self,
        week_id: DbId,
        position: i32,
        content: &PageContent,
    ) -> StoreResult<DbId> {
        let input = CreatePage {
            position,
            title: content.title.clone(),
            kind: content.kind,
            body: Some(content.body.clone()),
        };
        PageRepo::create(&self.pool, week_id, &input)
            .await
            .map(|p| p.id)
            .map_err(|e| db_err("insert page", e))
    }

    async fn update_page(&self, page_id: DbId, content: &PageContent) -> StoreResult<()> {
        let updated = PageRepo::overwrite_content(&self.pool, page_id, content)
            .await
            .map_err(|e| db_err("update page", e))?;
        if updated {
            Ok(())
        } else {
            Err(StoreError::new(format!("page {page_id} not found")))
        }
    }

    async fn delete_page(&self, page_id: DbId) -> StoreResult<()> {
        PageRepo::delete(&self.pool, page_id)
            .await
            .map(|_| ())
            .map_err(|e| db_err("delete page", e))
    }

    async fn insert_question(
        &self,
        page_id: DbId,
        number: i32,
        text: &str,
    ) -> StoreResult<DbId> {
        let input = CreateQuestion {
            number,
            text: text.to_string(),
        };
        QuestionRepo::create(&self.pool, page_id, &input)
            .await
            .map(|q| q.id)
            .map_err(|e| db_err("insert question", e))
    }

    async fn update_question(&self, question_id: DbId, text: &str) -> StoreResult<()> {
        let input = crate::models::question::UpdateQuestion {
            text: text.to_string(),
        };
        let updated = QuestionRepo::update(&self.pool, question_id, &input)
            .await
            .map_err(|e| db_err("update question", e))?;
        if updated.is_some() {
            Ok(())
        } else {
            Err(StoreError::new(format!("question {question_id} not found")))
        }
    }

    async fn delete_question(&self, question_id: DbId) -> StoreResult<()> {
        QuestionRepo::delete(&self.pool, question_id)
            .await
            .map(|_| ())
            .map_err(|e| db_err("delete question", e))
    }

    async fn replace_resources(
        &self,
        page_id: DbId,
        items: &[ResourceContent],
    ) -> StoreResult<()> {
        ResourceRepo::replace_all(&self.pool, page_id, items)
            .await
            .map_err(|e| db_err("replace resources", e))
    }

    async fn replace_videos(&self, page_id: DbId, items: &[VideoContent]) -> StoreResult<()> {
        VideoRepo::replace_all(&self.pool, page_id, items)
            .await
            .map_err(|e| db_err("replace videos", e))
    }
}
