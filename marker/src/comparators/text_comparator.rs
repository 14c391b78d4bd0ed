//! The default scoring rule, used for free-text kinds and unrecognized task types.
//!
//! Full points when the answer equals `correctAnswer` (or one of `expectedAnswers`) after trimming
//! and lower-casing. Without any answer key the task is left for a teacher to grade.

use crate::traits::comparator::AnswerComparator;
use crate::types::{FreeTextContent, NormalizedAnswer, TaskResult};
use crate::utilities::text_normalization::text_matches;

pub struct TextComparator;

impl AnswerComparator for TextComparator {
    type Content = FreeTextContent;

    fn compare(
        &self,
        task_id: &str,
        points: f64,
        content: &FreeTextContent,
        answer: &NormalizedAnswer,
    ) -> TaskResult {
        let NormalizedAnswer::Text(text) = answer else {
            return TaskResult::unanswered(task_id, points);
        };
        if !content.has_answer_key() {
            return TaskResult::needs_review(task_id, points);
        }

        match content.answer_key().find(|key| text_matches(key, text)) {
            Some(key) => TaskResult::scored(task_id, points, points, vec![key.to_string()], vec![]),
            None => {
                let expected = content.answer_key().map(str::to_string).collect();
                TaskResult::scored(task_id, 0.0, points, vec![], expected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn content(correct: Option<&str>, accepted: &[&str]) -> FreeTextContent {
        FreeTextContent {
            correct_answer: correct.map(str::to_string),
            accepted_answers: accepted.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn text(s: &str) -> NormalizedAnswer {
        NormalizedAnswer::Text(s.to_string())
    }

    #[test]
    fn test_trimmed_case_insensitive_match() {
        let r = TextComparator.compare("t", 2.0, &content(Some("Paris"), &[]), &text("  paris "));
        assert_eq!(r.awarded, 2.0);
    }

    #[test]
    fn test_wrong_answer() {
        let r = TextComparator.compare("t", 2.0, &content(Some("Paris"), &[]), &text("Lyon"));
        assert_eq!(r.awarded, 0.0);
        assert_eq!(r.missed, vec!["Paris"]);
    }

    #[test]
    fn test_expected_answers_are_accepted() {
        let r = TextComparator.compare("t", 1.0, &content(None, &["Parijs", "Paris"]), &text("paris"));
        assert_eq!(r.awarded, 1.0);
    }

    #[test]
    fn test_no_key_needs_review() {
        let r = TextComparator.compare("t", 5.0, &content(None, &[]), &text("an essay"));
        assert_eq!(r.awarded, 0.0);
        assert_eq!(r.outcome, Outcome::NeedsReview);
    }
}
