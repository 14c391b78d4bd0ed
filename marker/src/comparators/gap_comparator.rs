//! A comparator for fill-in-the-gaps tasks.
//!
//! Every expected gap answer is worth an equal share of the points. Both sides are trimmed and
//! lower-cased before comparison.

use crate::traits::comparator::AnswerComparator;
use crate::types::{FillGapsContent, NormalizedAnswer, TaskResult};
use crate::utilities::text_normalization::normalize_text;

pub struct GapComparator;

impl AnswerComparator for GapComparator {
    type Content = FillGapsContent;

    fn compare(
        &self,
        task_id: &str,
        points: f64,
        content: &FillGapsContent,
        answer: &NormalizedAnswer,
    ) -> TaskResult {
        let NormalizedAnswer::Gaps(given) = answer else {
            return TaskResult::unanswered(task_id, points);
        };
        if content.gap_answers.is_empty() {
            return TaskResult::needs_review(task_id, points);
        }

        let mut matched = Vec::new();
        let mut missed = Vec::new();
        for (i, expected) in content.gap_answers.iter().enumerate() {
            let label = format!("gap {}", i + 1);
            let hit = given
                .get(i)
                .is_some_and(|g| normalize_text(g) == normalize_text(expected));
            if hit {
                matched.push(label);
            } else {
                missed.push(label);
            }
        }

        let awarded = matched.len() as f64 / content.gap_answers.len() as f64 * points;
        TaskResult::scored(task_id, awarded, points, matched, missed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn content(answers: &[&str]) -> FillGapsContent {
        FillGapsContent {
            text: Some("[gap] has [gap] districts".into()),
            gaps: vec![],
            gap_answers: answers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn gaps(given: &[&str]) -> NormalizedAnswer {
        NormalizedAnswer::Gaps(given.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_case_insensitive_full_marks() {
        let r = GapComparator.compare("t", 2.0, &content(&["Amsterdam", "4"]), &gaps(&["amsterdam", "4"]));
        assert_eq!(r.awarded, 2.0);
    }

    #[test]
    fn test_one_of_two_gaps_correct() {
        let r = GapComparator.compare("t", 2.0, &content(&["Amsterdam", "4"]), &gaps(&["Rotterdam", "4"]));
        assert_eq!(r.awarded, 1.0);
        assert_eq!(r.missed, vec!["gap 1"]);
    }

    #[test]
    fn test_trailing_whitespace_is_ignored() {
        let r = GapComparator.compare("t", 1.0, &content(&["Amsterdam"]), &gaps(&["Amsterdam "]));
        assert_eq!(r.awarded, 1.0);
    }

    #[test]
    fn test_fewer_answers_than_gaps() {
        let r = GapComparator.compare("t", 3.0, &content(&["a", "b", "c"]), &gaps(&["a"]));
        assert_eq!(r.awarded, 1.0);
    }

    #[test]
    fn test_no_gap_answers_scores_zero() {
        let r = GapComparator.compare("t", 2.0, &content(&[]), &gaps(&["x"]));
        assert_eq!(r.awarded, 0.0);
        assert_eq!(r.outcome, Outcome::NeedsReview);
    }
}
