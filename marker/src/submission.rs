//! # Submission Module
//!
//! One student's attempt at a worksheet together with its grading state.
//!
//! Every change to a task score goes through a method on [`Submission`] that ends by calling
//! [`Submission::recompute_total`], so `score` is always the sum of the current per-task scores.
//!
//! Automatic and manual scores are told apart by [`FeedbackSource`]. Re-running the auto-scorer
//! leaves manual entries alone unless the caller forces it.

use crate::error::MarkerError;
use crate::report::ReportTask;
use crate::scorer::{SubmissionTotals, compute_totals};
use crate::types::{Outcome, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Submitted,
    Graded,
}

/// Who produced a task score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackSource {
    #[default]
    Auto,
    Manual,
}

/// Per-task grading outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFeedback {
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub source: FeedbackSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub worksheet_id: String,
    #[serde(default)]
    pub student_id: Option<String>,
    /// Raw answers keyed by task id, exactly as stored.
    #[serde(default)]
    pub answers: BTreeMap<String, Value>,
    #[serde(default, alias = "feedback_data")]
    pub task_feedback: BTreeMap<String, TaskFeedback>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub status: SubmissionStatus,
    /// Overall teacher feedback.
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub graded_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(
        id: impl Into<String>,
        worksheet_id: impl Into<String>,
        student_id: Option<String>,
        answers: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            worksheet_id: worksheet_id.into(),
            student_id,
            answers,
            task_feedback: BTreeMap::new(),
            score: 0.0,
            status: SubmissionStatus::Submitted,
            feedback: None,
            submitted_at: Some(Utc::now()),
            graded_at: None,
        }
    }

    /// Writes automatic scores from a marking report and recomputes the total.
    ///
    /// Entries a teacher set by hand are skipped unless `force` is set; a forced rescore still
    /// keeps their non-empty text. Automatic entries take the new text. Informational tasks get no
    /// entry. Returns the number of entries written.
    pub fn apply_auto_scores(&mut self, tasks: &[Task], report: &[ReportTask], force: bool) -> usize {
        let mut written = 0;
        for entry in report {
            if entry.outcome == Outcome::NotGradable {
                continue;
            }
            let existing = self.task_feedback.get(&entry.task_id);
            if !force && existing.is_some_and(|f| f.source == FeedbackSource::Manual) {
                continue;
            }
            let feedback = match existing {
                Some(f) if f.source == FeedbackSource::Manual && !f.feedback.is_empty() => {
                    f.feedback.clone()
                }
                _ => entry.feedback.clone(),
            };
            self.task_feedback.insert(
                entry.task_id.clone(),
                TaskFeedback {
                    score: entry.earned,
                    feedback,
                    source: FeedbackSource::Auto,
                },
            );
            written += 1;
        }
        self.recompute_total(tasks);
        written
    }

    /// Sets a teacher-entered score for one task.
    ///
    /// # Errors
    ///
    /// - [`MarkerError::UnknownTask`] if `task_id` is not one of `tasks`.
    /// - [`MarkerError::ScoreOutOfRange`] unless `0 <= score <= points`.
    pub fn set_manual_score(
        &mut self,
        tasks: &[Task],
        task_id: &str,
        score: f64,
    ) -> Result<SubmissionTotals, MarkerError> {
        let task = find_task(tasks, task_id)?;
        let max = task.points();
        if !score.is_finite() || score < 0.0 || score > max {
            return Err(MarkerError::ScoreOutOfRange {
                task_id: task_id.to_string(),
                score,
                max,
            });
        }

        let entry = self
            .task_feedback
            .entry(task_id.to_string())
            .or_insert_with(|| TaskFeedback {
                score: 0.0,
                feedback: String::new(),
                source: FeedbackSource::Manual,
            });
        entry.score = score;
        entry.source = FeedbackSource::Manual;

        Ok(self.recompute_total(tasks))
    }

    /// Replaces the feedback text of one task without touching its score.
    ///
    /// The entry becomes manual, so automatic rescoring leaves it alone unless forced. A task
    /// without an entry gets a manual entry with score 0.
    pub fn set_task_feedback(
        &mut self,
        tasks: &[Task],
        task_id: &str,
        text: impl Into<String>,
    ) -> Result<SubmissionTotals, MarkerError> {
        find_task(tasks, task_id)?;
        let text = text.into();
        self.task_feedback
            .entry(task_id.to_string())
            .and_modify(|f| {
                f.feedback = text.clone();
                f.source = FeedbackSource::Manual;
            })
            .or_insert_with(|| TaskFeedback {
                score: 0.0,
                feedback: text.clone(),
                source: FeedbackSource::Manual,
            });
        Ok(self.recompute_total(tasks))
    }

    /// Recomputes `score` from the full feedback map. This is the only place `score` is written.
    pub fn recompute_total(&mut self, tasks: &[Task]) -> SubmissionTotals {
        let totals = compute_totals(tasks, &self.task_feedback);
        self.score = totals.total_score;
        totals
    }

    /// Moves the submission to `graded`. Grading again refreshes `graded_at`.
    pub fn mark_graded(&mut self, summary: Option<String>) {
        self.status = SubmissionStatus::Graded;
        self.graded_at = Some(Utc::now());
        if let Some(summary) = summary {
            self.feedback = Some(summary);
        }
    }

    pub fn answer(&self, task_id: &str) -> Option<&Value> {
        self.answers.get(task_id)
    }
}

fn find_task<'a>(tasks: &'a [Task], task_id: &str) -> Result<&'a Task, MarkerError> {
    tasks
        .iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| MarkerError::UnknownTask(task_id.to_string()))
}
