//! A comparator for single- and multiple-choice tasks.
//!
//! Marks are all or nothing. Under [`MultiSelectPolicy::SingleAnswer`] a multiple-choice
//! selection must contain exactly one index and that index must equal `correctAnswer`. Under
//! [`MultiSelectPolicy::ExactSet`] the de-duplicated selection must equal the `correctAnswers`
//! set, which falls back to `{correctAnswer}` when the list is empty.

use crate::traits::comparator::AnswerComparator;
use crate::types::{ChoiceContent, NormalizedAnswer, TaskResult};
use std::collections::BTreeSet;
use util::scoring_config::MultiSelectPolicy;

pub struct ChoiceComparator {
    pub policy: MultiSelectPolicy,
}

impl ChoiceComparator {
    pub fn new(policy: MultiSelectPolicy) -> Self {
        Self { policy }
    }

    fn compare_single(
        &self,
        task_id: &str,
        points: f64,
        key: Option<usize>,
        selected: &[usize],
    ) -> TaskResult {
        let Some(key) = key else {
            return TaskResult::needs_review(task_id, points);
        };
        if selected.len() == 1 && selected[0] == key {
            TaskResult::scored(task_id, points, points, vec![option_label(key)], vec![])
        } else {
            TaskResult::scored(task_id, 0.0, points, vec![], vec![option_label(key)])
        }
    }

    fn compare_set(
        &self,
        task_id: &str,
        points: f64,
        content: &ChoiceContent,
        selected: &[usize],
    ) -> TaskResult {
        let key: BTreeSet<usize> = if content.correct_answers.is_empty() {
            content.correct_answer.into_iter().collect()
        } else {
            content.correct_answers.iter().copied().collect()
        };
        if key.is_empty() {
            return TaskResult::needs_review(task_id, points);
        }

        let chosen: BTreeSet<usize> = selected.iter().copied().collect();
        let matched = key.intersection(&chosen).copied().map(option_label).collect();
        let missed = key.difference(&chosen).copied().map(option_label).collect();
        let awarded = if chosen == key { points } else { 0.0 };
        TaskResult::scored(task_id, awarded, points, matched, missed)
    }
}

impl AnswerComparator for ChoiceComparator {
    type Content = ChoiceContent;

    fn compare(
        &self,
        task_id: &str,
        points: f64,
        content: &ChoiceContent,
        answer: &NormalizedAnswer,
    ) -> TaskResult {
        match answer {
            NormalizedAnswer::Choice(index) => {
                self.compare_single(task_id, points, content.correct_answer, &[*index])
            }
            NormalizedAnswer::Selection(selected) => match self.policy {
                MultiSelectPolicy::SingleAnswer => {
                    self.compare_single(task_id, points, content.correct_answer, selected)
                }
                MultiSelectPolicy::ExactSet => self.compare_set(task_id, points, content, selected),
            },
            _ => TaskResult::unanswered(task_id, points),
        }
    }
}

fn option_label(index: usize) -> String {
    format!("option {index}")
}
