//! Per-entity change detection over the template-owned field sets.
//!
//! The content structs in [`crate::course`] carry exactly the
//! template-owned fields for their entity type, so "apply template content
//! onto the active counterpart" is a store update with the template's
//! struct — active-owned fields are not representable in the payload and
//! cannot be clobbered. What remains for the merger is deciding whether a
//! write is needed at all: an unchanged entity must produce no write, which
//! is what makes a second sync run observably idempotent at the storage
//! layer.

use crate::course::{ModuleContent, PageContent, ResourceContent, VideoContent, WeekContent};

pub fn module_fields_changed(template: &ModuleContent, active: &ModuleContent) -> bool {
    template != active
}

pub fn week_fields_changed(template: &WeekContent, active: &WeekContent) -> bool {
    template != active
}

pub fn page_fields_changed(template: &PageContent, active: &PageContent) -> bool {
    template != active
}

pub fn question_text_changed(template: &str, active: &str) -> bool {
    template != active
}

/// Resources compare by full content including order. The collections carry
/// no row identity, so equality of the value lists is the only meaningful
/// comparison.
pub fn resources_equal(template: &[ResourceContent], active: &[ResourceContent]) -> bool {
    template == active
}

pub fn videos_equal(template: &[VideoContent], active: &[VideoContent]) -> bool {
    template == active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::PageKind;

    fn module_content(title: &str) -> ModuleContent {
        ModuleContent {
            title: title.into(),
            description: Some("desc".into()),
            instructor: Some("Dr. Adams".into()),
            duration: None,
            participation: None,
            time_expectations: None,
        }
    }

    #[test]
    fn identical_module_content_is_unchanged() {
        assert!(!module_fields_changed(
            &module_content("Ethics"),
            &module_content("Ethics")
        ));
        assert!(module_fields_changed(
            &module_content("Ethics"),
            &module_content("Ethics II")
        ));
    }

    #[test]
    fn week_unlock_date_participates_in_comparison() {
        let a = WeekContent {
            title: "W1".into(),
            description: None,
            unlock_date: None,
        };
        let mut b = a.clone();
        assert!(!week_fields_changed(&a, &b));
        b.unlock_date = Some(chrono::Utc::now());
        assert!(week_fields_changed(&a, &b));
    }

    #[test]
    fn page_body_json_participates_in_comparison() {
        let a = PageContent {
            title: "Intro".into(),
            kind: PageKind::Intro,
            body: serde_json::json!({ "blocks": [1, 2] }),
        };
        let mut b = a.clone();
        assert!(!page_fields_changed(&a, &b));
        b.body = serde_json::json!({ "blocks": [1, 2, 3] });
        assert!(page_fields_changed(&a, &b));
    }

    #[test]
    fn resource_order_matters() {
        let r1 = ResourceContent {
            title: "Syllabus".into(),
            url: "https://example.edu/syllabus.pdf".into(),
            description: None,
            sort_order: 0,
        };
        let r2 = ResourceContent {
            title: "Reading".into(),
            url: "https://example.edu/reading.pdf".into(),
            description: None,
            sort_order: 1,
        };
        assert!(resources_equal(
            &[r1.clone(), r2.clone()],
            &[r1.clone(), r2.clone()]
        ));
        assert!(!resources_equal(&[r1.clone(), r2.clone()], &[r2, r1]));
    }
}
