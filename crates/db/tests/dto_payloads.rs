//! Deserialization tests for the request DTOs: the JSON bodies the API
//! accepts must map onto the DTO shapes, with optional fields defaulting
//! correctly and validation bounds enforced.

use lectern_db::models::discussion::CreatePost;
use lectern_db::models::module::{CreateModule, UpdateModule};
use lectern_db::models::page::CreatePage;
use lectern_db::models::progress::UpsertProgress;
use lectern_db::models::week::CreateWeek;
use validator::Validate;

#[test]
fn create_module_accepts_minimal_payload() {
    let input: CreateModule = serde_json::from_str(r#"{ "title": "Church History I" }"#).unwrap();
    assert_eq!(input.title, "Church History I");
    assert!(input.description.is_none());
    assert!(input.validate().is_ok());
}

#[test]
fn create_module_rejects_empty_title() {
    let input: CreateModule = serde_json::from_str(r#"{ "title": "" }"#).unwrap();
    assert!(input.validate().is_err());
}

#[test]
fn update_module_all_fields_optional() {
    let input: UpdateModule = serde_json::from_str("{}").unwrap();
    assert!(input.title.is_none());
    assert!(input.validate().is_ok());
}

#[test]
fn create_week_requires_positive_number() {
    let input: CreateWeek =
        serde_json::from_str(r#"{ "number": 0, "title": "Week zero" }"#).unwrap();
    assert!(input.validate().is_err());

    let input: CreateWeek =
        serde_json::from_str(r#"{ "number": 1, "title": "Week one" }"#).unwrap();
    assert!(input.validate().is_ok());
}

#[test]
fn create_page_parses_kind_and_defaults_body() {
    let input: CreatePage = serde_json::from_str(
        r#"{ "position": 0, "title": "Opening discussion", "kind": "discussion" }"#,
    )
    .unwrap();
    assert_eq!(input.kind.as_str(), "discussion");
    assert!(input.body.is_none());

    let bad = serde_json::from_str::<CreatePage>(
        r#"{ "position": 0, "title": "Oops", "kind": "quiz" }"#,
    );
    assert!(bad.is_err(), "unknown page kind must be rejected");
}

#[test]
fn create_post_length_bounds() {
    let input: CreatePost = serde_json::from_str(r#"{ "content": "Amen." }"#).unwrap();
    assert!(input.validate().is_ok());
    assert!(input.parent_id.is_none());

    let empty: CreatePost = serde_json::from_str(r#"{ "content": "" }"#).unwrap();
    assert!(empty.validate().is_err());
}

#[test]
fn upsert_progress_accepts_partial_payloads() {
    let input: UpsertProgress = serde_json::from_str(r#"{ "completed": true }"#).unwrap();
    assert_eq!(input.completed, Some(true));
    assert!(input.current_page.is_none());
}
