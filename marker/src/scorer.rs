//! # Scorer Module
//!
//! This module scores individual tasks and aggregates task scores into submission totals.
//!
//! - [`score_task`] dispatches a normalized answer to the comparator for its task kind.
//! - [`compute_totals`] derives the total, maximum and percentage of a submission from its full
//!   per-task feedback map.

use crate::comparators::{
    choice_comparator::ChoiceComparator, gap_comparator::GapComparator,
    matching_comparator::MatchingComparator, ordering_comparator::OrderingComparator,
    text_comparator::TextComparator,
};
use crate::submission::TaskFeedback;
use crate::traits::comparator::AnswerComparator;
use crate::types::{NormalizedAnswer, Task, TaskKind, TaskResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use util::scoring_config::ScoringConfig;

/// Scores one task.
///
/// The result's `awarded` is always within `[0, task.points()]`. A missing answer scores 0 for
/// every kind, and informational tasks are never scored. Scoring is pure: the same task and answer
/// always give the same result.
///
/// # Example
///
/// ```
/// use marker::parsers::task_parser::TaskParser;
/// use marker::scorer::score_task;
/// use marker::traits::parser::Parser;
/// use marker::types::{NormalizedAnswer, TaskRecord};
/// use serde_json::json;
/// use util::scoring_config::ScoringConfig;
///
/// let config = ScoringConfig::default_config();
/// let record = TaskRecord {
///     id: "q1".into(),
///     task_type: "single_choice".into(),
///     content: json!({ "correctAnswer": 2, "points": 1 }),
///     order_index: 0,
/// };
/// let task = TaskParser.parse(&record, &config).unwrap();
///
/// assert_eq!(score_task(&task, &NormalizedAnswer::Choice(2), &config).awarded, 1.0);
/// assert_eq!(score_task(&task, &NormalizedAnswer::Choice(1), &config).awarded, 0.0);
/// assert_eq!(score_task(&task, &NormalizedAnswer::Missing, &config).awarded, 0.0);
/// ```
pub fn score_task(task: &Task, answer: &NormalizedAnswer, config: &ScoringConfig) -> TaskResult {
    let points = task.points();
    let id = task.id.as_str();

    let result = match &task.kind {
        TaskKind::Text | TaskKind::Information => TaskResult::not_gradable(id, points),
        _ if answer.is_missing() => TaskResult::unanswered(id, points),
        TaskKind::MultipleChoice(content) | TaskKind::SingleChoice(content) => {
            ChoiceComparator::new(config.marking.multi_select_policy)
                .compare(id, points, content, answer)
        }
        TaskKind::Matching(content) => MatchingComparator.compare(id, points, content, answer),
        TaskKind::Ordering(content) => OrderingComparator.compare(id, points, content, answer),
        TaskKind::FillGaps(content) => GapComparator.compare(id, points, content, answer),
        TaskKind::FreeText(content) | TaskKind::Unrecognized(content) => {
            TextComparator.compare(id, points, content, answer)
        }
    };

    debug!(
        task_id = id,
        task_type = %task.raw_type,
        awarded = result.awarded,
        possible = result.possible,
        outcome = ?result.outcome,
        "Scored task"
    );
    result
}

/// Submission-level aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubmissionTotals {
    pub total_score: f64,
    pub max_score: f64,
    /// `round(total / max * 100)`, or 0 when the worksheet is worth nothing.
    pub percentage: u32,
}

/// Computes submission totals from the full feedback map.
///
/// Tasks without feedback contribute 0 to the total but still count towards the maximum.
/// Feedback for task ids that are not in `tasks` is ignored.
pub fn compute_totals(tasks: &[Task], feedback: &BTreeMap<String, TaskFeedback>) -> SubmissionTotals {
    let total_score: f64 = tasks
        .iter()
        .map(|t| feedback.get(&t.id).map_or(0.0, |f| f.score))
        .sum();
    let max_score: f64 = tasks.iter().map(Task::points).sum();

    let percentage = if max_score > 0.0 {
        (total_score / max_score * 100.0).round().max(0.0) as u32
    } else {
        0
    };

    SubmissionTotals {
        total_score,
        max_score,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::task_parser::TaskParser;
    use crate::submission::FeedbackSource;
    use crate::traits::parser::Parser;
    use crate::types::{Outcome, TaskRecord};
    use serde_json::{Value, json};
    use util::scoring_config::MultiSelectPolicy;

    fn task(id: &str, task_type: &str, content: Value) -> Task {
        let record = TaskRecord {
            id: id.into(),
            task_type: task_type.into(),
            content,
            order_index: 0,
        };
        TaskParser
            .parse(&record, &ScoringConfig::default_config())
            .unwrap()
    }

    fn feedback(score: f64) -> TaskFeedback {
        TaskFeedback {
            score,
            feedback: String::new(),
            source: FeedbackSource::Auto,
        }
    }

    #[test]
    fn test_missing_answer_scores_zero_for_every_kind() {
        let cfg = ScoringConfig::default_config();
        let tasks = [
            task("a", "multiple-choice", json!({ "correctAnswer": 0 })),
            task("b", "single_choice", json!({ "correctAnswer": 0 })),
            task("c", "short_answer", json!({ "correctAnswer": "x" })),
            task("d", "essay", json!({})),
            task("e", "open-question", json!({})),
            task("f", "matching", json!({ "pairs": [{ "left": "A", "right": "1" }] })),
            task("g", "ordering", json!({ "correctOrder": [0] })),
            task("h", "fill_gaps", json!({ "gapAnswers": ["x"] })),
            task("i", "text", json!({})),
            task("j", "information", json!({})),
            task("k", "crossword", json!({ "correctAnswer": "x" })),
        ];
        for t in &tasks {
            let r = score_task(t, &NormalizedAnswer::Missing, &cfg);
            assert_eq!(r.awarded, 0.0, "task {}", t.id);
        }
    }

    #[test]
    fn test_information_is_never_gradable() {
        let cfg = ScoringConfig::default_config();
        let t = task("i", "information", json!({ "points": 3 }));
        let r = score_task(&t, &NormalizedAnswer::Text("hello".into()), &cfg);
        assert_eq!(r.awarded, 0.0);
        assert_eq!(r.outcome, Outcome::NotGradable);
    }

    #[test]
    fn test_unrecognized_type_uses_default_rule() {
        let cfg = ScoringConfig::default_config();
        let t = task("k", "crossword", json!({ "correctAnswer": "Yes", "points": 2 }));
        let r = score_task(&t, &NormalizedAnswer::Text("yes".into()), &cfg);
        assert_eq!(r.awarded, 2.0);
    }

    #[test]
    fn test_multi_select_policy_comes_from_config() {
        let t = task(
            "m",
            "multiple-choice",
            json!({ "correctAnswer": 0, "correctAnswers": [0, 1] }),
        );
        let answer = NormalizedAnswer::Selection(vec![1, 0]);

        let default = ScoringConfig::default_config();
        assert_eq!(score_task(&t, &answer, &default).awarded, 0.0);

        let mut exact = ScoringConfig::default_config();
        exact.marking.multi_select_policy = MultiSelectPolicy::ExactSet;
        assert_eq!(score_task(&t, &answer, &exact).awarded, 1.0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let cfg = ScoringConfig::default_config();
        let t = task("g", "fill_gaps", json!({ "gapAnswers": ["Amsterdam", "4"], "points": 2 }));
        let answer = NormalizedAnswer::Gaps(vec!["rotterdam".into(), "4".into()]);
        assert_eq!(score_task(&t, &answer, &cfg), score_task(&t, &answer, &cfg));
    }

    #[test]
    fn test_totals_sum_feedback_and_points() {
        let tasks = vec![
            task("a", "essay", json!({ "points": 2 })),
            task("b", "essay", json!({ "points": 3 })),
            task("c", "essay", json!({})),
        ];
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), feedback(2.0));
        map.insert("b".to_string(), feedback(1.5));

        let totals = compute_totals(&tasks, &map);
        assert_eq!(totals.total_score, 3.5);
        assert_eq!(totals.max_score, 6.0);
        assert_eq!(totals.percentage, 58);
    }

    #[test]
    fn test_changing_one_score_changes_total_by_delta() {
        let tasks = vec![
            task("a", "essay", json!({ "points": 4 })),
            task("b", "essay", json!({ "points": 4 })),
        ];
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), feedback(1.0));
        map.insert("b".to_string(), feedback(2.0));
        let before = compute_totals(&tasks, &map).total_score;

        map.insert("b".to_string(), feedback(3.5));
        let after = compute_totals(&tasks, &map).total_score;
        assert_eq!(after - before, 1.5);
    }

    #[test]
    fn test_empty_worksheet_has_zero_percentage() {
        let totals = compute_totals(&[], &BTreeMap::new());
        assert_eq!(totals.max_score, 0.0);
        assert_eq!(totals.percentage, 0);
    }

    #[test]
    fn test_feedback_for_unknown_tasks_is_ignored() {
        let tasks = vec![task("a", "essay", json!({}))];
        let mut map = BTreeMap::new();
        map.insert("ghost".to_string(), feedback(10.0));
        assert_eq!(compute_totals(&tasks, &map).total_score, 0.0);
    }
}
