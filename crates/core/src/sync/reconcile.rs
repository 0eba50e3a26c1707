//! Three-way partition of ordered sibling collections.
//!
//! Generalizes resolution + merge over a whole collection: every template
//! item either has an active counterpart (update path) or does not (insert
//! path), and every active item without a template counterpart falls under
//! the entity's excess policy. The partitions at one level are independent
//! of each other; the engine dispatches them concurrently.

use serde::{Deserialize, Serialize};

use crate::course::{PageTree, QuestionNode, WeekTree};
use crate::sync::resolver;

/// What to do with active-side entities beyond the template's length.
///
/// Weeks are not governed by a policy: excess active weeks are always
/// preserved, since an admin may have manually added weeks beyond the
/// template. Resources and videos are always replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcessPolicy {
    Delete,
    Preserve,
}

/// Tunable reconciliation behavior for the shrink cases the source system
/// left ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Active pages beyond the template's page count.
    pub excess_pages: ExcessPolicy,
    /// Active questions with no template counterpart. Regardless of this
    /// setting, a question that has discussion posts is never deleted.
    pub excess_questions: ExcessPolicy,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            excess_pages: ExcessPolicy::Delete,
            excess_questions: ExcessPolicy::Delete,
        }
    }
}

/// The result of partitioning one sibling collection.
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// Template item paired with its resolved active counterpart.
    pub matched: Vec<(&'a T, &'a T)>,
    /// Template items with no counterpart: the insert path.
    pub template_only: Vec<&'a T>,
    /// Active items with no counterpart: preserve or delete per policy.
    pub active_only: Vec<&'a T>,
}

/// Partition weeks by ordinal number.
pub fn partition_weeks<'a>(
    template: &'a [WeekTree],
    active: &'a [WeekTree],
) -> Partition<'a, WeekTree> {
    let mut matched = Vec::new();
    let mut template_only = Vec::new();
    for t in template {
        match resolver::week_counterpart(t.number, active) {
            Some(a) => matched.push((t, a)),
            None => template_only.push(t),
        }
    }
    let active_only = active
        .iter()
        .filter(|a| resolver::week_counterpart(a.number, template).is_none())
        .collect();
    Partition {
        matched,
        template_only,
        active_only,
    }
}

/// Partition pages by sequence position.
pub fn partition_pages<'a>(
    template: &'a [PageTree],
    active: &'a [PageTree],
) -> Partition<'a, PageTree> {
    let mut matched = Vec::new();
    let mut template_only = Vec::new();
    for (i, t) in template.iter().enumerate() {
        match resolver::page_counterpart(i, active) {
            Some(a) => matched.push((t, a)),
            None => template_only.push(t),
        }
    }
    let active_only = active.iter().skip(template.len()).collect();
    Partition {
        matched,
        template_only,
        active_only,
    }
}

/// Partition questions by 1-based ordinal number.
pub fn partition_questions<'a>(
    template: &'a [QuestionNode],
    active: &'a [QuestionNode],
) -> Partition<'a, QuestionNode> {
    let mut matched = Vec::new();
    let mut template_only = Vec::new();
    for t in template {
        match resolver::question_counterpart(t.number, active) {
            Some(a) => matched.push((t, a)),
            None => template_only.push(t),
        }
    }
    let active_only = active
        .iter()
        .filter(|a| resolver::question_counterpart(a.number, template).is_none())
        .collect();
    Partition {
        matched,
        template_only,
        active_only,
    }
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
                title: format!("W{number}"),
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
                title: format!("P{position}"),
                kind: PageKind::Intro,
                body: serde_json::Value::Null,
            },
            questions: vec![],
            resources: vec![],
            videos: vec![],
        }
    }

    fn question(id: i64, number: i32) -> QuestionNode {
        QuestionNode {
            id,
            number,
            text: format!("Q{number}"),
            post_count: 0,
        }
    }

    #[test]
    fn weeks_partition_three_ways() {
        let template = vec![week(1, 1), week(2, 2), week(3, 4)];
        let active = vec![week(10, 1), week(11, 3)];

        let part = partition_weeks(&template, &active);

        assert_eq!(part.matched.len(), 1);
        assert_eq!(part.matched[0].0.id, 1);
        assert_eq!(part.matched[0].1.id, 10);
        let created: Vec<i32> = part.template_only.iter().map(|w| w.number).collect();
        assert_eq!(created, vec![2, 4]);
        let excess: Vec<i32> = part.active_only.iter().map(|w| w.number).collect();
        assert_eq!(excess, vec![3]);
    }

    #[test]
    fn pages_partition_by_index_prefix() {
        let template = vec![page(1, 0), page(2, 1), page(3, 2)];
        let active = vec![page(10, 0), page(11, 1)];

        let part = partition_pages(&template, &active);
        assert_eq!(part.matched.len(), 2);
        assert_eq!(part.template_only.len(), 1);
        assert!(part.active_only.is_empty());

        // Shrinking template leaves active tail in active_only.
        let part = partition_pages(&template[..1], &active);
        assert_eq!(part.matched.len(), 1);
        assert!(part.template_only.is_empty());
        assert_eq!(part.active_only.len(), 1);
        assert_eq!(part.active_only[0].id, 11);
    }

    #[test]
    fn questions_partition_by_number() {
        let template = vec![question(1, 1), question(2, 2)];
        let active = vec![question(20, 2), question(21, 3)];

        let part = partition_questions(&template, &active);
        assert_eq!(part.matched.len(), 1);
        assert_eq!(part.matched[0].1.id, 20);
        assert_eq!(part.template_only[0].number, 1);
        assert_eq!(part.active_only[0].number, 3);
    }

    #[test]
    fn empty_collections_partition_cleanly() {
        let part = partition_weeks(&[], &[]);
        assert!(part.matched.is_empty());
        assert!(part.template_only.is_empty());
        assert!(part.active_only.is_empty());
    }

    #[test]
    fn default_options_delete_excess_pages_and_questions() {
        let options = SyncOptions::default();
        assert_eq!(options.excess_pages, ExcessPolicy::Delete);
        assert_eq!(options.excess_questions, ExcessPolicy::Delete);
    }
}
