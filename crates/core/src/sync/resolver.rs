//! Identity resolution across the template/active divide.
//!
//! Template and active copies were created independently, so database row
//! ids never match. Counterparts are found by ordinal/positional identity:
//! weeks by `number`, pages by position in the ordered page sequence,
//! questions by 1-based `number`. Resources and videos carry no durable
//! identity at all; their collections are treated as fully replaceable by
//! the reconciler.
//!
//! Resolution is a pure lookup. No match is a valid, expected outcome (the
//! merger takes the insert path), never an error.

use crate::course::{PageTree, QuestionNode, WeekTree};

/// Find the active week matching a template week's number.
pub fn week_counterpart<'a>(number: i32, active: &'a [WeekTree]) -> Option<&'a WeekTree> {
    active.iter().find(|w| w.number == number)
}

/// Find the active page at the same sequence index as a template page.
///
/// Matching is by index in the ordered page list, not by the stored
/// `position` value, per the positional-identity contract.
pub fn page_counterpart<'a>(index: usize, active: &'a [PageTree]) -> Option<&'a PageTree> {
    active.get(index)
}

/// Find the active question matching a template question's 1-based number.
pub fn question_counterpart<'a>(
    number: i32,
    active: &'a [QuestionNode],
) -> Option<&'a QuestionNode> {
    active.iter().find(|q| q.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{PageContent, PageKind, WeekContent};

    fn week(id: i64, number: i32) -> WeekTree {
        WeekTree {
            id,
            number,
            content: WeekContent {
                title: format!("Week {number}"),
                description: None,
                unlock_date: None,
            },
            pages: vec![],
        }
    }

    fn page(id: i64, position: i32) -> PageTree {
        PageTree {
            id,
            position,
            content: PageContent {
                title: format!("Page {position}"),
                kind: PageKind::Reading,
                body: serde_json::Value::Null,
            },
            questions: vec![],
            resources: vec![],
            videos: vec![],
        }
    }

    #[test]
    fn week_match_is_by_number_not_id() {
        let active = vec![week(100, 2), week(101, 1)];
        let found = week_counterpart(1, &active).unwrap();
        assert_eq!(found.id, 101);
        assert!(week_counterpart(3, &active).is_none());
    }

    #[test]
    fn page_match_is_by_sequence_index() {
        let active = vec![page(7, 0), page(8, 1)];
        assert_eq!(page_counterpart(1, &active).unwrap().id, 8);
        assert!(page_counterpart(2, &active).is_none());
    }

    #[test]
    fn question_match_is_by_ordinal_number() {
        let active = vec![
            QuestionNode {
                id: 40,
                number: 1,
                text: "first".into(),
                post_count: 3,
            },
            QuestionNode {
                id: 41,
                number: 2,
                text: "second".into(),
                post_count: 0,
            },
        ];
        assert_eq!(question_counterpart(2, &active).unwrap().id, 41);
        assert!(question_counterpart(9, &active).is_none());
    }

    #[test]
    fn absence_is_not_an_error() {
        assert!(week_counterpart(1, &[]).is_none());
        assert!(page_counterpart(0, &[]).is_none());
        assert!(question_counterpart(1, &[]).is_none());
    }
}
