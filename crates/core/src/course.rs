//! Course domain value objects.
//!
//! The sync engine treats every entity as a value object loaded per
//! operation, never cached across operations. Content structs (`*Content`)
//! carry exactly the template-owned field set for their entity type, so a
//! store-level update with one of them can never clobber active-owned state.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a module.
///
/// A `draft` module is an admin-authored template and is only ever a sync
/// source. A `launched` module is a student-facing copy and is only ever a
/// sync target. An `archived` module is frozen and neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Draft,
    Launched,
    Archived,
}

impl ModuleStatus {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Launched => "launched",
            Self::Archived => "archived",
        }
    }

    /// Parse a database representation. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "launched" => Some(Self::Launched),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a page within a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Discussion,
    Intro,
    Reading,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discussion => "discussion",
            Self::Intro => "intro",
            Self::Reading => "reading",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "discussion" => Some(Self::Discussion),
            "intro" => Some(Self::Intro),
            "reading" => Some(Self::Reading),
            _ => None,
        }
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Template-owned content
// ---------------------------------------------------------------------------

/// Module-level fields owned by the template.
///
/// `status`, `template_id`, `launched_at`, and `archived_at` are active-owned
/// and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<String>,
    pub participation: Option<String>,
    pub time_expectations: Option<String>,
}

/// Week-level fields owned by the template. Weeks carry no active-owned
/// fields themselves; their children (questions, progress) do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekContent {
    pub title: String,
    pub description: Option<String>,
    pub unlock_date: Option<Timestamp>,
}

/// Page-level fields owned by the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub kind: PageKind,
    /// Free-form rich text, stored as JSON.
    pub body: serde_json::Value,
}

/// A resource link on a page. No durable identity; the whole collection is
/// replaced on sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// An embedded video on a page. No durable identity; the whole collection is
/// replaced on sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoContent {
    pub title: String,
    pub url: String,
    pub duration_secs: Option<i32>,
    pub sort_order: i32,
}

// ---------------------------------------------------------------------------
// Records and trees as loaded from storage
// ---------------------------------------------------------------------------

/// A module row as loaded from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: DbId,
    pub content: ModuleContent,
    pub status: ModuleStatus,
    /// Back-reference to the source draft, if this copy was launched from one.
    pub template_id: Option<DbId>,
    pub launched_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

/// A question as it exists inside a loaded page tree.
///
/// `number` is the 1-based ordinal within the page and the durable cross-copy
/// identity key. `post_count` is the number of discussion posts anchored to
/// this question on the active side (always 0 on a template).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionNode {
    pub id: DbId,
    pub number: i32,
    pub text: String,
    pub post_count: i64,
}

/// A page with its child collections, as loaded from storage.
///
/// `position` is the 0-based index within the week and the implicit identity
/// key used to match pages across the template/active divide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTree {
    pub id: DbId,
    pub position: i32,
    pub content: PageContent,
    pub questions: Vec<QuestionNode>,
    pub resources: Vec<ResourceContent>,
    pub videos: Vec<VideoContent>,
}

/// A week with its pages, as loaded from storage.
///
/// `number` is the week's sequence number within the module and the durable
/// cross-copy identity key. Database row ids differ between template and
/// active copies and are never used for matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekTree {
    pub id: DbId,
    pub number: i32,
    pub content: WeekContent,
    pub pages: Vec<PageTree>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_status_roundtrip() {
        for status in [
            ModuleStatus::Draft,
            ModuleStatus::Launched,
            ModuleStatus::Archived,
        ] {
            assert_eq!(ModuleStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ModuleStatus::parse("retired"), None);
    }

    #[test]
    fn page_kind_roundtrip() {
        for kind in [PageKind::Discussion, PageKind::Intro, PageKind::Reading] {
            assert_eq!(PageKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(PageKind::parse(""), None);
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ModuleStatus::Launched).unwrap();
        assert_eq!(json, "\"launched\"");
    }
}
