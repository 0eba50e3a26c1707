//! End-to-end tests of the sync engine against the in-memory store.
//!
//! Covers the behavioral guarantees the engine makes: idempotence,
//! non-destruction of student data, ordinal identity across text changes,
//! excess policies, precondition failures, and partial-failure collection.

use assert_matches::assert_matches;
use serde_json::json;

use lectern_core::course::{
    ModuleContent, ModuleStatus, PageContent, PageKind, ResourceContent, VideoContent, WeekContent,
};
use lectern_core::sync::memory::MemoryStore;
use lectern_core::sync::{ExcessPolicy, ModuleStore, SyncEngine, SyncError, SyncOptions};
use lectern_core::types::DbId;

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

fn module_content(title: &str) -> ModuleContent {
    ModuleContent {
        title: title.to_string(),
        description: Some("An introductory survey.".to_string()),
        instructor: Some("Dr. Okafor".to_string()),
        duration: Some("8 weeks".to_string()),
        participation: None,
        time_expectations: Some("4-6 hours weekly".to_string()),
    }
}

fn week_content(title: &str) -> WeekContent {
    WeekContent {
        title: title.to_string(),
        description: None,
        unlock_date: None,
    }
}

fn page_content(title: &str, kind: PageKind) -> PageContent {
    PageContent {
        title: title.to_string(),
        kind,
        body: json!({ "blocks": [{ "type": "paragraph", "text": title }] }),
    }
}

fn resource(title: &str, sort_order: i32) -> ResourceContent {
    ResourceContent {
        title: title.to_string(),
        url: format!("https://library.example.edu/{sort_order}"),
        description: None,
        sort_order,
    }
}

fn video(title: &str, sort_order: i32) -> VideoContent {
    VideoContent {
        title: title.to_string(),
        url: format!("https://media.example.edu/{sort_order}"),
        duration_secs: Some(600),
        sort_order,
    }
}

/// Seed a draft template and a launched copy linked back to it.
async fn seed_linked_pair(store: &MemoryStore) -> (DbId, DbId) {
    let template_id = store
        .add_module(module_content("Pastoral Care"), ModuleStatus::Draft, None)
        .await;
    let active_id = store
        .add_module(
            module_content("Pastoral Care"),
            ModuleStatus::Launched,
            Some(template_id),
        )
        .await;
    (template_id, active_id)
}

// ---------------------------------------------------------------------------
// Week creation and field propagation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn creates_missing_week_and_updates_existing_title() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    store.add_week(template_id, 1, week_content("Intro")).await;
    store.add_week(template_id, 2, week_content("Ethics")).await;
    store.add_week(active_id, 1, week_content("Intro (old)")).await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();

    assert!(report.ran_clean());
    assert_eq!(report.weeks.updated, 1);
    assert_eq!(report.weeks.created, 1);

    let weeks = store.get_weeks(active_id).await.unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].number, 1);
    assert_eq!(weeks[0].content.title, "Intro");
    assert_eq!(weeks[1].number, 2);
    assert_eq!(weeks[1].content.title, "Ethics");
    assert!(weeks[1].pages.is_empty());
}

#[tokio::test]
async fn module_fields_merge_preserves_active_owned_fields() {
    let store = MemoryStore::new();
    let template_id = store
        .add_module(module_content("Homiletics v2"), ModuleStatus::Draft, None)
        .await;
    let active_id = store
        .add_module(
            module_content("Homiletics"),
            ModuleStatus::Launched,
            Some(template_id),
        )
        .await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(report.modules.updated, 1);

    let active = store.get_module(active_id).await.unwrap().unwrap();
    assert_eq!(active.content.title, "Homiletics v2");
    // Active-owned fields survive the merge.
    assert_eq!(active.status, ModuleStatus::Launched);
    assert_eq!(active.template_id, Some(template_id));
}

#[tokio::test]
async fn new_template_week_arrives_empty_of_student_data() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 7, week_content("Eschatology")).await;
    let t_page = store
        .add_page(t_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    store.add_question(t_page, 1, "What is hope?").await;
    store.set_resources(t_page, vec![resource("Reader", 0)]).await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();

    assert!(report.ran_clean());
    assert_eq!(report.weeks.created, 1);
    assert_eq!(report.pages.created, 1);
    assert_eq!(report.questions.created, 1);
    assert_eq!(report.resources_replaced, 1);

    let weeks = store.get_weeks(active_id).await.unwrap();
    let week = &weeks[0];
    assert_eq!(week.number, 7);
    let question = &week.pages[0].questions[0];
    assert_eq!(question.post_count, 0);
    assert!(store.posts_for(question.id).await.is_empty());
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_run_is_a_noop_at_the_storage_layer() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("Scripture")).await;
    let t_page = store
        .add_page(t_week, 0, page_content("Reading", PageKind::Reading))
        .await;
    store.add_question(t_page, 1, "Summarize the passage.").await;
    store.set_resources(t_page, vec![resource("Commentary", 0)]).await;
    store.set_videos(t_page, vec![video("Lecture", 0)]).await;
    store.set_zoom(template_id, json!({ "meeting_id": "883" })).await;

    let engine = SyncEngine::new(&store);
    let first = engine
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert!(!first.is_noop());

    store.clear_writes().await;
    let second = engine
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();

    assert!(second.is_noop(), "second run reported work: {second:?}");
    assert_eq!(
        store.write_count().await,
        0,
        "second run wrote to storage: {:?}",
        store.writes().await
    );
}

// ---------------------------------------------------------------------------
// Non-destruction of student data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn question_keeps_row_identity_and_posts_across_text_change() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("Covenant")).await;
    let t_page = store
        .add_page(t_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    store.add_question(t_page, 1, "What does covenant mean today?").await;

    let a_week = store.add_week(active_id, 1, week_content("Covenant")).await;
    let a_page = store
        .add_page(a_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    let a_question = store.add_question(a_page, 1, "What does covenant mean?").await;
    let root_post = store.add_post(a_question, 11, None, "It means promise.").await;
    store.add_post(a_question, 12, Some(root_post), "And belonging.").await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert!(report.ran_clean());
    assert_eq!(report.questions.updated, 1);

    let weeks = store.get_weeks(active_id).await.unwrap();
    let question = &weeks[0].pages[0].questions[0];
    assert_eq!(question.id, a_question, "question row identity changed");
    assert_eq!(question.text, "What does covenant mean today?");
    assert_eq!(question.post_count, 2);

    let posts = store.posts_for(a_question).await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].content, "It means promise.");
    assert_eq!(posts[1].parent_id, Some(root_post));
}

#[tokio::test]
async fn progress_rows_are_untouched() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    store.add_week(template_id, 1, week_content("Liturgy v2")).await;
    let a_week = store.add_week(active_id, 1, week_content("Liturgy")).await;
    store.add_progress(21, a_week, 3, false).await;
    store.add_progress(22, a_week, 5, true).await;
    let before_21 = store.progress_for(21, a_week).await.unwrap();
    let before_22 = store.progress_for(22, a_week).await.unwrap();

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(report.weeks.updated, 1);

    assert_eq!(store.progress_for(21, a_week).await.unwrap(), before_21);
    assert_eq!(store.progress_for(22, a_week).await.unwrap(), before_22);
}

#[tokio::test]
async fn active_only_extra_week_is_preserved() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    store.add_week(template_id, 1, week_content("Week one")).await;
    store.add_week(active_id, 1, week_content("Week one")).await;
    let extra = store
        .add_week(active_id, 6, week_content("Faculty-added retreat week"))
        .await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert!(report.ran_clean());
    assert_eq!(report.weeks.deleted, 0);

    let weeks = store.get_weeks(active_id).await.unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[1].id, extra);
    assert_eq!(weeks[1].content.title, "Faculty-added retreat week");
}

// ---------------------------------------------------------------------------
// Excess policies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn excess_active_pages_deleted_by_default() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("W1")).await;
    store.add_page(t_week, 0, page_content("Keep", PageKind::Intro)).await;

    let a_week = store.add_week(active_id, 1, week_content("W1")).await;
    store.add_page(a_week, 0, page_content("Keep", PageKind::Intro)).await;
    store.add_page(a_week, 1, page_content("Stale", PageKind::Reading)).await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(report.pages.deleted, 1);

    let weeks = store.get_weeks(active_id).await.unwrap();
    assert_eq!(weeks[0].pages.len(), 1);
    assert_eq!(weeks[0].pages[0].content.title, "Keep");
}

#[tokio::test]
async fn excess_active_pages_kept_under_preserve_policy() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("W1")).await;
    store.add_page(t_week, 0, page_content("Keep", PageKind::Intro)).await;

    let a_week = store.add_week(active_id, 1, week_content("W1")).await;
    store.add_page(a_week, 0, page_content("Keep", PageKind::Intro)).await;
    store.add_page(a_week, 1, page_content("Extra", PageKind::Reading)).await;

    let options = SyncOptions {
        excess_pages: ExcessPolicy::Preserve,
        excess_questions: ExcessPolicy::Delete,
    };
    let report = SyncEngine::with_options(&store, options)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(report.pages.deleted, 0);
    assert_eq!(store.get_weeks(active_id).await.unwrap()[0].pages.len(), 2);
}

#[tokio::test]
async fn excess_question_without_posts_is_deleted() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("W1")).await;
    let t_page = store
        .add_page(t_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    store.add_question(t_page, 1, "Only question now.").await;

    let a_week = store.add_week(active_id, 1, week_content("W1")).await;
    let a_page = store
        .add_page(a_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    store.add_question(a_page, 1, "Only question now.").await;
    store.add_question(a_page, 2, "Dropped from the template.").await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(report.questions.deleted, 1);
    assert_eq!(
        store.get_weeks(active_id).await.unwrap()[0].pages[0]
            .questions
            .len(),
        1
    );
}

#[tokio::test]
async fn excess_question_with_posts_survives_delete_policy() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("W1")).await;
    let t_page = store
        .add_page(t_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    store.add_question(t_page, 1, "Kept in template.").await;

    let a_week = store.add_week(active_id, 1, week_content("W1")).await;
    let a_page = store
        .add_page(a_week, 0, page_content("Discussion", PageKind::Discussion))
        .await;
    store.add_question(a_page, 1, "Kept in template.").await;
    let busy_question = store.add_question(a_page, 2, "Dropped but discussed.").await;
    store.add_post(busy_question, 31, None, "Student reply.").await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();

    assert!(report.ran_clean());
    assert_eq!(report.questions.deleted, 0);
    let questions = &store.get_weeks(active_id).await.unwrap()[0].pages[0].questions;
    assert_eq!(questions.len(), 2);
    assert_eq!(store.posts_for(busy_question).await.len(), 1);
}

// ---------------------------------------------------------------------------
// Resources, videos, zoom
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resource_and_video_collections_are_fully_replaced() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;

    let t_week = store.add_week(template_id, 1, week_content("W1")).await;
    let t_page = store.add_page(t_week, 0, page_content("Reading", PageKind::Reading)).await;
    store
        .set_resources(t_page, vec![resource("New reader", 0), resource("Appendix", 1)])
        .await;
    store.set_videos(t_page, vec![video("Rerecorded lecture", 0)]).await;

    let a_week = store.add_week(active_id, 1, week_content("W1")).await;
    let a_page = store.add_page(a_week, 0, page_content("Reading", PageKind::Reading)).await;
    store.set_resources(a_page, vec![resource("Old reader", 0)]).await;
    store
        .set_videos(a_page, vec![video("Old lecture", 0), video("Outtake", 1)])
        .await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(report.resources_replaced, 1);
    assert_eq!(report.videos_replaced, 1);

    let page = &store.get_weeks(active_id).await.unwrap()[0].pages[0];
    let titles: Vec<&str> = page.resources.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["New reader", "Appendix"]);
    assert_eq!(page.videos.len(), 1);
    assert_eq!(page.videos[0].title, "Rerecorded lecture");
}

#[tokio::test]
async fn zoom_info_is_template_owned_pass_through() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;
    store
        .set_zoom(template_id, json!({ "meeting_id": "991", "passcode": "grace" }))
        .await;
    store.set_zoom(active_id, json!({ "meeting_id": "old" })).await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert!(report.zoom_updated);
    assert_eq!(
        store.zoom_of(active_id).await.unwrap(),
        json!({ "meeting_id": "991", "passcode": "grace" })
    );
}

#[tokio::test]
async fn missing_template_zoom_leaves_active_zoom_alone() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;
    store.set_zoom(active_id, json!({ "meeting_id": "kept" })).await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert!(!report.zoom_updated);
    assert_eq!(
        store.zoom_of(active_id).await.unwrap(),
        json!({ "meeting_id": "kept" })
    );
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_non_draft_template_without_mutation() {
    let store = MemoryStore::new();
    let template_id = store
        .add_module(module_content("Was launched"), ModuleStatus::Launched, None)
        .await;
    let active_id = store
        .add_module(module_content("Target"), ModuleStatus::Launched, None)
        .await;

    let result = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await;

    assert_matches!(
        result,
        Err(SyncError::InvalidStatus {
            status: ModuleStatus::Launched,
            expected: ModuleStatus::Draft,
            ..
        })
    );
    assert_eq!(store.write_count().await, 0);
}

#[tokio::test]
async fn rejects_non_launched_target_without_mutation() {
    let store = MemoryStore::new();
    let template_id = store
        .add_module(module_content("Template"), ModuleStatus::Draft, None)
        .await;
    let active_id = store
        .add_module(module_content("Archived copy"), ModuleStatus::Archived, None)
        .await;

    let result = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await;

    assert_matches!(
        result,
        Err(SyncError::InvalidStatus {
            status: ModuleStatus::Archived,
            expected: ModuleStatus::Launched,
            ..
        })
    );
    assert_eq!(store.write_count().await, 0);
}

#[tokio::test]
async fn rejects_missing_modules() {
    let store = MemoryStore::new();
    let active_id = store
        .add_module(module_content("Lonely"), ModuleStatus::Launched, None)
        .await;

    let engine = SyncEngine::new(&store);
    assert_matches!(
        engine.sync_to_active_module(999, active_id).await,
        Err(SyncError::NotFound { id: 999, .. })
    );
    let template_id = store
        .add_module(module_content("T"), ModuleStatus::Draft, None)
        .await;
    assert_matches!(
        engine.sync_to_active_module(template_id, 998).await,
        Err(SyncError::NotFound { id: 998, .. })
    );
}

#[tokio::test]
async fn sync_from_link_resolves_or_rejects_the_template_link() {
    let store = MemoryStore::new();
    let engine = SyncEngine::new(&store);

    let unlinked = store
        .add_module(module_content("Freestanding"), ModuleStatus::Launched, None)
        .await;
    assert_matches!(
        engine.sync_from_link(unlinked).await,
        Err(SyncError::NoTemplateLink { id }) if id == unlinked
    );

    let dangling = store
        .add_module(module_content("Orphan"), ModuleStatus::Launched, Some(777))
        .await;
    assert_matches!(
        engine.sync_from_link(dangling).await,
        Err(SyncError::TemplateMissing { template_id: 777, .. })
    );

    let (template_id, active_id) = seed_linked_pair(&store).await;
    store.add_week(template_id, 1, week_content("Week one")).await;
    let report = engine.sync_from_link(active_id).await.unwrap();
    assert_eq!(report.weeks.created, 1);
}

// ---------------------------------------------------------------------------
// Partial failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collects_branch_errors_without_stopping_siblings() {
    let store = MemoryStore::new();
    let template_id = store
        .add_module(module_content("Renamed module"), ModuleStatus::Draft, None)
        .await;
    let active_id = store
        .add_module(
            module_content("Old name"),
            ModuleStatus::Launched,
            Some(template_id),
        )
        .await;

    store.add_week(template_id, 1, week_content("One, revised")).await;
    store.add_week(template_id, 2, week_content("Two, revised")).await;
    store.add_week(template_id, 3, week_content("Brand new")).await;
    store.add_week(active_id, 1, week_content("One")).await;
    store.add_week(active_id, 2, week_content("Two")).await;

    store.fail_on("update_week").await;

    let report = SyncEngine::new(&store)
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();

    // Both matched-week updates failed and were collected.
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().all(|e| e.entity == "week"));
    assert!(!report.ran_clean());

    // Sibling branches still ran: the new week was created and the
    // module-level merge landed.
    assert_eq!(report.weeks.created, 1);
    assert_eq!(report.modules.updated, 1);
    let weeks = store.get_weeks(active_id).await.unwrap();
    assert_eq!(weeks.len(), 3);
    assert_eq!(
        store.get_module(active_id).await.unwrap().unwrap().content.title,
        "Renamed module"
    );
}

#[tokio::test]
async fn retry_after_partial_failure_converges() {
    let store = MemoryStore::new();
    let (template_id, active_id) = seed_linked_pair(&store).await;
    store.add_week(template_id, 1, week_content("Revised")).await;
    store.add_week(active_id, 1, week_content("Original")).await;

    store.fail_on("update_week").await;
    let engine = SyncEngine::new(&store);
    let first = engine
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert_eq!(first.errors.len(), 1);
    assert_eq!(
        store.get_weeks(active_id).await.unwrap()[0].content.title,
        "Original"
    );

    // The transient failure clears; a retry from scratch finishes the work.
    store.clear_failures().await;
    let retry = engine
        .sync_to_active_module(template_id, active_id)
        .await
        .unwrap();
    assert!(retry.ran_clean());
    assert_eq!(retry.weeks.updated, 1);
    assert_eq!(
        store.get_weeks(active_id).await.unwrap()[0].content.title,
        "Revised"
    );
}
