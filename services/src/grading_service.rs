//! Teacher-facing grading operations.
//!
//! Every operation loads the submission and its worksheet from the store, changes it through the
//! methods on [`Submission`], which keep the total in step, and saves the whole record back.

use crate::error::ServiceError;
use crate::submission_store::SubmissionStore;
use marker::report::MarkReport;
use marker::scorer::SubmissionTotals;
use marker::submission::Submission;
use marker::types::Task;
use marker::{MarkingJob, parse_tasks};
use tracing::info;
use util::scoring_config::{RescorePolicy, ScoringConfig};

/// Summary stored by [`GradingService::save_feedback`] when the teacher gives none.
pub const DEFAULT_SUMMARY: &str = "Reviewed by teacher";

pub struct GradingService<S: SubmissionStore> {
    store: S,
    config: ScoringConfig,
}

impl<S: SubmissionStore> GradingService<S> {
    pub fn new(store: S, config: ScoringConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores every task of a submission automatically and saves the scores.
    ///
    /// Manual scores are kept unless `force` is set or the configured rescore policy is
    /// `overwrite`. The returned report holds the automatic scores; the saved total also includes
    /// any manual scores that were kept.
    pub async fn auto_score(&self, submission_id: &str, force: bool) -> Result<MarkReport, ServiceError> {
        let mut submission = self.load_submission(submission_id).await?;
        let records = self.store.fetch_tasks(&submission.worksheet_id).await?;
        let tasks = parse_tasks(&records, &self.config)?;

        let report = MarkingJob::from_tasks(tasks.clone(), submission.answers.clone(), self.config.clone())
            .with_submission_id(submission_id)
            .mark()?;

        let overwrite = force || self.config.marking.rescore_policy == RescorePolicy::Overwrite;
        let written = submission.apply_auto_scores(&tasks, &report.tasks, overwrite);
        self.store.save_submission(&submission).await?;

        info!(
            submission_id,
            written,
            overwrite,
            score = submission.score,
            "Auto-scored submission"
        );
        Ok(report)
    }

    pub async fn set_manual_score(
        &self,
        submission_id: &str,
        task_id: &str,
        score: f64,
    ) -> Result<SubmissionTotals, ServiceError> {
        let (mut submission, tasks) = self.load_with_tasks(submission_id).await?;
        let totals = submission.set_manual_score(&tasks, task_id, score)?;
        self.store.save_submission(&submission).await?;
        info!(submission_id, task_id, score, "Manual score saved");
        Ok(totals)
    }

    pub async fn set_task_feedback(
        &self,
        submission_id: &str,
        task_id: &str,
        text: &str,
    ) -> Result<SubmissionTotals, ServiceError> {
        let (mut submission, tasks) = self.load_with_tasks(submission_id).await?;
        let totals = submission.set_task_feedback(&tasks, task_id, text)?;
        self.store.save_submission(&submission).await?;
        Ok(totals)
    }

    /// Recomputes the total and marks the submission graded with the given summary.
    pub async fn save_feedback(
        &self,
        submission_id: &str,
        summary: Option<String>,
    ) -> Result<Submission, ServiceError> {
        let summary = summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string());
        self.grade(submission_id, |_| summary).await
    }

    /// Like [`save_feedback`](Self::save_feedback) with a summary stating the score.
    pub async fn send_feedback(&self, submission_id: &str) -> Result<Submission, ServiceError> {
        self.grade(submission_id, |totals| {
            format!(
                "Graded: {}/{} points",
                totals.total_score, totals.max_score
            )
        })
        .await
    }

    pub async fn totals(&self, submission_id: &str) -> Result<SubmissionTotals, ServiceError> {
        let (mut submission, tasks) = self.load_with_tasks(submission_id).await?;
        Ok(submission.recompute_total(&tasks))
    }

    async fn grade(
        &self,
        submission_id: &str,
        summary: impl FnOnce(&SubmissionTotals) -> String,
    ) -> Result<Submission, ServiceError> {
        let (mut submission, tasks) = self.load_with_tasks(submission_id).await?;
        let totals = submission.recompute_total(&tasks);
        submission.mark_graded(Some(summary(&totals)));
        self.store.save_submission(&submission).await?;
        info!(
            submission_id,
            score = totals.total_score,
            max = totals.max_score,
            "Submission graded"
        );
        Ok(submission)
    }

    async fn load_submission(&self, submission_id: &str) -> Result<Submission, ServiceError> {
        self.store
            .fetch_submission(submission_id)
            .await?
            .ok_or_else(|| ServiceError::submission_not_found(submission_id))
    }

    async fn load_with_tasks(&self, submission_id: &str) -> Result<(Submission, Vec<Task>), ServiceError> {
        let submission = self.load_submission(submission_id).await?;
        let records = self.store.fetch_tasks(&submission.worksheet_id).await?;
        let tasks = parse_tasks(&records, &self.config)?;
        Ok((submission, tasks))
    }
}
