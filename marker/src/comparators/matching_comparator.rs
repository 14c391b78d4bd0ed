//! A comparator for matching tasks.
//!
//! Each pair in the answer key is worth an equal share of the task's points. A pair counts when the
//! student mapped its left item to exactly its right item.

use crate::traits::comparator::AnswerComparator;
use crate::types::{MatchingContent, NormalizedAnswer, TaskResult};

pub struct MatchingComparator;

impl AnswerComparator for MatchingComparator {
    type Content = MatchingContent;

    fn compare(
        &self,
        task_id: &str,
        points: f64,
        content: &MatchingContent,
        answer: &NormalizedAnswer,
    ) -> TaskResult {
        let NormalizedAnswer::Matching(mapping) = answer else {
            return TaskResult::unanswered(task_id, points);
        };
        if content.pairs.is_empty() {
            return TaskResult::needs_review(task_id, points);
        }

        let mut matched = Vec::new();
        let mut missed = Vec::new();
        for pair in &content.pairs {
            let label = format!("{} - {}", pair.left, pair.right);
            match mapping.get(&pair.left) {
                Some(right) if right == &pair.right => matched.push(label),
                _ => missed.push(label),
            }
        }

        let awarded = matched.len() as f64 / content.pairs.len() as f64 * points;
        TaskResult::scored(task_id, awarded, points, matched, missed)
    }
}
