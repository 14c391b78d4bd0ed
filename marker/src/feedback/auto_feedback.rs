//! # AutoFeedback Strategy
//!
//! This module provides the `AutoFeedback` strategy for the marker system.
//! It implements the [`Feedback`] trait to generate short template-based feedback for each task
//! from the outcome and the matched and missed answer-key items of its result.
//!
//! | outcome | message |
//! |---|---|
//! | needs review | `Manual grading required` |
//! | unanswered | `No answer given` |
//! | full marks | `All answers correct` |
//! | otherwise | `Missing: <items>` |
//! | informational | empty |

use crate::error::MarkerError;
use crate::traits::feedback::{Feedback, FeedbackEntry};
use crate::types::{Outcome, TaskResult};

/// Automatic feedback strategy: generates template-based feedback for each task.
#[derive(Debug, Default)]
pub struct AutoFeedback;

impl Feedback for AutoFeedback {
    fn assemble_feedback(&self, results: &[TaskResult]) -> Result<Vec<FeedbackEntry>, MarkerError> {
        let mut feedback_entries = Vec::with_capacity(results.len());

        for result in results {
            let summary = match result.outcome {
                Outcome::NotGradable => String::new(),
                Outcome::NeedsReview => "Manual grading required".to_string(),
                Outcome::Unanswered => "No answer given".to_string(),
                Outcome::Scored if result.is_full_marks() => "All answers correct".to_string(),
                Outcome::Scored if !result.missed.is_empty() => {
                    format!("Missing: {}", result.missed.join(", "))
                }
                Outcome::Scored => "Incorrect".to_string(),
            };
            feedback_entries.push(FeedbackEntry {
                task: result.task_id.clone(),
                message: summary,
            });
        }

        Ok(feedback_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(name: &str, matched: &[&str], missed: &[&str], awarded: f64, possible: f64) -> TaskResult {
        TaskResult::scored(
            name,
            awarded,
            possible,
            matched.iter().map(|s| s.to_string()).collect(),
            missed.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_all_answers_correct() {
        let task = make_task("Task1", &["gap 1", "gap 2"], &[], 2.0, 2.0);
        let feedback = AutoFeedback.assemble_feedback(&[task]).unwrap();
        assert_eq!(
            feedback,
            vec![FeedbackEntry {
                task: "Task1".to_string(),
                message: "All answers correct".to_string(),
            }]
        );
    }

    #[test]
    fn test_some_items_missed() {
        let task = make_task("Task2", &["A - 1"], &["B - 2", "C - 3"], 1.0, 3.0);
        let feedback = AutoFeedback.assemble_feedback(&[task]).unwrap();
        assert_eq!(feedback[0].message, "Missing: B - 2, C - 3");
    }

    #[test]
    fn test_outcomes_without_comparison() {
        let results = vec![
            TaskResult::unanswered("u", 1.0),
            TaskResult::needs_review("r", 1.0),
            TaskResult::not_gradable("i", 0.0),
        ];
        let feedback = AutoFeedback.assemble_feedback(&results).unwrap();
        let messages: Vec<&str> = feedback.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["No answer given", "Manual grading required", ""]);
    }

    #[test]
    fn test_wrong_without_missed_items() {
        let task = make_task("T", &[], &[], 0.0, 1.0);
        let feedback = AutoFeedback.assemble_feedback(&[task]).unwrap();
        assert_eq!(feedback[0].message, "Incorrect");
    }
}
