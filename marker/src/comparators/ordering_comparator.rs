//! A comparator for ordering tasks: full marks only when every position matches `correctOrder`.

use crate::traits::comparator::AnswerComparator;
use crate::types::{NormalizedAnswer, OrderingContent, TaskResult};

pub struct OrderingComparator;

impl AnswerComparator for OrderingComparator {
    type Content = OrderingContent;

    fn compare(
        &self,
        task_id: &str,
        points: f64,
        content: &OrderingContent,
        answer: &NormalizedAnswer,
    ) -> TaskResult {
        let NormalizedAnswer::Order(order) = answer else {
            return TaskResult::unanswered(task_id, points);
        };
        // No canonical order means nothing can be checked.
        if content.correct_order.is_empty() {
            return TaskResult::needs_review(task_id, points);
        }

        let mut matched = Vec::new();
        let mut missed = Vec::new();
        for (position, expected) in content.correct_order.iter().enumerate() {
            let label = match content.items.get(*expected) {
                Some(item) => format!("position {}: {item}", position + 1),
                None => format!("position {}", position + 1),
            };
            if order.get(position) == Some(expected) {
                matched.push(label);
            } else {
                missed.push(label);
            }
        }

        let awarded = if *order == content.correct_order {
            points
        } else {
            0.0
        };
        TaskResult::scored(task_id, awarded, points, matched, missed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn content(order: &[usize]) -> OrderingContent {
        OrderingContent {
            items: vec!["first".into(), "second".into(), "third".into()],
            correct_order: order.to_vec(),
        }
    }

    #[test]
    fn test_correct_order_gets_full_points() {
        let r = OrderingComparator.compare(
            "t",
            2.0,
            &content(&[0, 1, 2]),
            &NormalizedAnswer::Order(vec![0, 1, 2]),
        );
        assert_eq!(r.awarded, 2.0);
        assert!(r.missed.is_empty());
    }

    #[test]
    fn test_one_swap_gets_nothing() {
        let r = OrderingComparator.compare(
            "t",
            2.0,
            &content(&[0, 1, 2]),
            &NormalizedAnswer::Order(vec![1, 0, 2]),
        );
        assert_eq!(r.awarded, 0.0);
        assert_eq!(r.matched, vec!["position 3: third"]);
        assert_eq!(r.missed.len(), 2);
    }

    #[test]
    fn test_trailing_extra_items_fail() {
        let r = OrderingComparator.compare(
            "t",
            1.0,
            &content(&[0, 1]),
            &NormalizedAnswer::Order(vec![0, 1, 2]),
        );
        assert_eq!(r.awarded, 0.0);
    }

    #[test]
    fn test_empty_correct_order_scores_zero() {
        let r = OrderingComparator.compare(
            "t",
            1.0,
            &content(&[]),
            &NormalizedAnswer::Order(vec![]),
        );
        assert_eq!(r.awarded, 0.0);
        assert_eq!(r.outcome, Outcome::NeedsReview);
    }
}
