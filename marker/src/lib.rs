//! # Marker Library
//!
//! This crate provides the core logic for automatically scoring worksheet submissions.
//! It parses stored task records into typed tasks, normalizes the answers students gave, scores
//! every task with the comparator for its kind and aggregates the result into a mark report.
//!
//! ## Key Concepts
//! - **MarkingJob**: The main struct representing a marking job for a single submission.
//! - **Comparators**: One scoring rule per task kind (choice, matching, ordering, gaps, text).
//! - **Feedback**: Pluggable per-task feedback text (blank or generated).
//! - **Submission**: Grading state of one attempt; keeps the total in step with task scores.
//! - **Reports**: Structured output summarizing scores, feedback and warnings per task.

pub mod comparators;
pub mod error;
pub mod feedback;
pub mod parsers;
pub mod report;
pub mod scorer;
pub mod submission;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::error::MarkerError;
use crate::parsers::answer_parser::AnswerParser;
use crate::parsers::task_parser::TaskParser;
use crate::report::{MarkReport, ReportTask, Score};
use crate::scorer::{compute_totals, score_task};
use crate::submission::{FeedbackSource, TaskFeedback};
use crate::traits::feedback::Feedback;
use crate::traits::parser::Parser;
use crate::types::{NormalizedAnswer, Task, TaskRecord, TaskResult};

use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};
use util::scoring_config::ScoringConfig;

/// Represents a marking job for a single student submission.
///
/// # Fields
/// - `tasks`: The worksheet's task rows in any order, or tasks already parsed by [`parse_tasks`].
/// - `answers`: Raw answers keyed by task id.
/// - `submission_id`: Copied into the report when set.
/// - `feedback`: Strategy for per-task feedback text; defaults to the configured scheme.
/// - `config`: Scoring configuration.
pub struct MarkingJob<'a> {
    tasks: JobTasks,
    answers: BTreeMap<String, Value>,
    submission_id: Option<String>,
    feedback: Box<dyn Feedback + Send + Sync + 'a>,
    config: ScoringConfig,
}

enum JobTasks {
    Records(Vec<TaskRecord>),
    Parsed(Vec<Task>),
}

impl<'a> MarkingJob<'a> {
    /// Create a new marking job.
    ///
    /// # Arguments
    /// * `records` - The worksheet's task records.
    /// * `answers` - Raw answers keyed by task id.
    /// * `config` - Scoring configuration; its `feedback_scheme` picks the feedback strategy.
    pub fn new(
        records: Vec<TaskRecord>,
        answers: BTreeMap<String, Value>,
        config: ScoringConfig,
    ) -> Self {
        Self::from_parts(JobTasks::Records(records), answers, config)
    }

    /// Create a marking job over tasks the caller already parsed with [`parse_tasks`].
    pub fn from_tasks(tasks: Vec<Task>, answers: BTreeMap<String, Value>, config: ScoringConfig) -> Self {
        Self::from_parts(JobTasks::Parsed(tasks), answers, config)
    }

    fn from_parts(tasks: JobTasks, answers: BTreeMap<String, Value>, config: ScoringConfig) -> Self {
        Self {
            tasks,
            answers,
            submission_id: None,
            feedback: feedback::for_scheme(config.marking.feedback_scheme),
            config,
        }
    }

    pub fn with_submission_id(mut self, id: impl Into<String>) -> Self {
        self.submission_id = Some(id.into());
        self
    }

    /// Set a custom feedback strategy for this marking job.
    ///
    /// # Arguments
    /// * `feedback` - An implementation of the `Feedback` trait.
    pub fn with_feedback<F: Feedback + Send + Sync + 'a>(mut self, feedback: F) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Run the marking process and generate a report.
    ///
    /// # Returns
    /// * `Ok(MarkReport)` with one entry per task, in `order_index` order.
    /// * `Err(MarkerError)` if a task record cannot be parsed or two records share an id.
    ///
    /// # Steps
    /// 1. Parses and orders the task records, unless the job was built from parsed tasks.
    /// 2. Normalizes each answer; malformed answers become warnings and score as missing.
    /// 3. Scores each task; unsupported task types become warnings and use the default rule.
    /// 4. Assembles feedback text with the configured strategy.
    /// 5. Builds the report with per-task scores, the overall mark and the percentage.
    pub fn mark(self) -> Result<MarkReport, MarkerError> {
        let tasks = match self.tasks {
            JobTasks::Records(records) => parse_tasks(&records, &self.config)?,
            JobTasks::Parsed(tasks) => tasks,
        };

        let mut results: Vec<TaskResult> = Vec::with_capacity(tasks.len());
        let mut warnings: Vec<Vec<String>> = Vec::with_capacity(tasks.len());

        for task in &tasks {
            let mut task_warnings = Vec::new();

            if task.task_type.is_none() {
                let err = MarkerError::UnsupportedTaskType(task.raw_type.clone());
                warn!(task_id = %task.id, error = %err, "Scoring with the default rule");
                task_warnings.push(err.to_string());
            }

            let answer = match AnswerParser.parse((task, self.answers.get(&task.id)), &self.config) {
                Ok(answer) => answer,
                Err(err) => {
                    warn!(task_id = %task.id, error = %err, "Treating malformed answer as missing");
                    task_warnings.push(err.to_string());
                    NormalizedAnswer::Missing
                }
            };

            results.push(score_task(task, &answer, &self.config));
            warnings.push(task_warnings);
        }

        let feedback_entries = self.feedback.assemble_feedback(&results)?;
        let mut feedback_by_task: BTreeMap<&str, &str> = feedback_entries
            .iter()
            .map(|f| (f.task.as_str(), f.message.as_str()))
            .collect();

        let mut scores: BTreeMap<String, TaskFeedback> = BTreeMap::new();
        let mut report_tasks = Vec::with_capacity(tasks.len());
        for ((task, result), task_warnings) in tasks.iter().zip(results).zip(warnings) {
            scores.insert(
                task.id.clone(),
                TaskFeedback {
                    score: result.awarded,
                    feedback: String::new(),
                    source: FeedbackSource::Auto,
                },
            );
            report_tasks.push(ReportTask {
                task_id: task.id.clone(),
                task_type: task.raw_type.clone(),
                order_index: task.order_index,
                earned: result.awarded,
                total: result.possible,
                outcome: result.outcome,
                feedback: feedback_by_task
                    .remove(task.id.as_str())
                    .unwrap_or_default()
                    .to_string(),
                warnings: task_warnings,
            });
        }

        let totals = compute_totals(&tasks, &scores);
        info!(
            submission_id = self.submission_id.as_deref().unwrap_or("-"),
            tasks = report_tasks.len(),
            earned = totals.total_score,
            total = totals.max_score,
            "Marking complete"
        );

        Ok(MarkReport {
            created_at: Utc::now().to_rfc3339(),
            submission_id: self.submission_id,
            mark: Score {
                earned: totals.total_score,
                total: totals.max_score,
            },
            percentage: totals.percentage,
            tasks: report_tasks,
        })
    }
}

/// Parses task records and orders them by `order_index`.
///
/// Records with equal `order_index` keep their input order.
///
/// # Errors
/// * [`MarkerError::DuplicateTask`] if two records share an id.
/// * [`MarkerError::InvalidContent`] if a record's content is not an object.
pub fn parse_tasks(records: &[TaskRecord], config: &ScoringConfig) -> Result<Vec<Task>, MarkerError> {
    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(MarkerError::DuplicateTask(record.id.clone()));
        }
        tasks.push(TaskParser.parse(record, config)?);
    }
    tasks.sort_by_key(|t| t.order_index);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::auto_feedback::AutoFeedback;
    use crate::types::Outcome;
    use chrono::DateTime;
    use serde_json::json;

    fn is_valid_iso8601(s: &str) -> bool {
        DateTime::parse_from_rfc3339(s).is_ok()
    }

    fn record(id: &str, task_type: &str, order_index: i64, content: Value) -> TaskRecord {
        TaskRecord {
            id: id.into(),
            task_type: task_type.into(),
            content,
            order_index,
        }
    }

    fn worksheet() -> Vec<TaskRecord> {
        vec![
            record("gaps", "fill_gaps", 3, json!({ "gapAnswers": ["Amsterdam", "4"], "points": 2 })),
            record("choice", "single_choice", 1, json!({ "correctAnswer": 2, "points": 1 })),
            record("intro", "information", 0, json!({ "text": "Read carefully" })),
            record(
                "match",
                "matching",
                4,
                json!({ "pairs": [{ "left": "A", "right": "1" }, { "left": "B", "right": "2" }], "points": 2 }),
            ),
            record("order", "ordering", 2, json!({ "correctOrder": [0, 1, 2], "points": 2 })),
        ]
    }

    fn answers(entries: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(entries).unwrap()
    }

    #[test]
    fn test_marker_happy_path() {
        let job = MarkingJob::new(
            worksheet(),
            answers(json!({
                "choice": 2,
                "order": [0, 1, 2],
                "gaps": ["Rotterdam", "4"],
                "match": { "A": "1", "B": "3" }
            })),
            ScoringConfig::default_config(),
        )
        .with_submission_id("s1");

        let report = job.mark().unwrap();
        assert!(is_valid_iso8601(&report.created_at));
        assert_eq!(report.submission_id.as_deref(), Some("s1"));

        let ids: Vec<&str> = report.tasks.iter().map(|t| t.task_id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "choice", "order", "gaps", "match"]);

        assert_eq!(report.task("choice").unwrap().earned, 1.0);
        assert_eq!(report.task("order").unwrap().earned, 2.0);
        assert_eq!(report.task("gaps").unwrap().earned, 1.0);
        assert_eq!(report.task("match").unwrap().earned, 1.0);
        assert_eq!(report.task("intro").unwrap().outcome, Outcome::NotGradable);

        // information counts 1 point towards the maximum
        assert_eq!(report.mark.earned, 5.0);
        assert_eq!(report.mark.total, 8.0);
        assert_eq!(report.percentage, 63);
        assert!(report.warnings().is_empty());
        assert!(report.tasks.iter().all(|t| t.feedback.is_empty()));
    }

    #[test]
    fn test_missing_answers_score_zero() {
        let report = MarkingJob::new(worksheet(), BTreeMap::new(), ScoringConfig::default_config())
            .mark()
            .unwrap();
        assert_eq!(report.mark.earned, 0.0);
        assert_eq!(report.percentage, 0);
    }

    #[test]
    fn test_malformed_answer_becomes_warning() {
        let report = MarkingJob::new(
            worksheet(),
            answers(json!({ "order": "first, then second", "choice": 2 })),
            ScoringConfig::default_config(),
        )
        .mark()
        .unwrap();
        let order = report.task("order").unwrap();
        assert_eq!(order.earned, 0.0);
        assert_eq!(order.outcome, Outcome::Unanswered);
        assert_eq!(order.warnings.len(), 1);
        assert!(order.warnings[0].contains("malformed answer"));
        assert_eq!(report.task("choice").unwrap().earned, 1.0);
    }

    #[test]
    fn test_unsupported_type_uses_default_rule_with_warning() {
        let records = vec![record("x", "crossword", 0, json!({ "correctAnswer": "Yes", "points": 3 }))];
        let report = MarkingJob::new(
            records,
            answers(json!({ "x": " yes " })),
            ScoringConfig::default_config(),
        )
        .mark()
        .unwrap();
        let task = report.task("x").unwrap();
        assert_eq!(task.earned, 3.0);
        assert_eq!(task.task_type, "crossword");
        assert_eq!(task.warnings, vec!["unsupported task type 'crossword'"]);
    }

    #[test]
    fn test_duplicate_task_ids_fail_the_job() {
        let records = vec![
            record("a", "essay", 0, json!({})),
            record("a", "essay", 1, json!({})),
        ];
        let err = MarkingJob::new(records, BTreeMap::new(), ScoringConfig::default_config())
            .mark()
            .unwrap_err();
        assert_eq!(err, MarkerError::DuplicateTask("a".into()));
    }

    #[test]
    fn test_auto_feedback_strategy() {
        let report = MarkingJob::new(
            worksheet(),
            answers(json!({ "choice": 2, "gaps": ["Rotterdam", "4"] })),
            ScoringConfig::default_config(),
        )
        .with_feedback(AutoFeedback)
        .mark()
        .unwrap();
        assert_eq!(report.task("choice").unwrap().feedback, "All answers correct");
        assert_eq!(report.task("gaps").unwrap().feedback, "Missing: gap 1");
        assert_eq!(report.task("order").unwrap().feedback, "No answer given");
        assert_eq!(report.task("intro").unwrap().feedback, "");
    }

    #[test]
    fn test_marking_twice_gives_the_same_scores() {
        let make = || {
            MarkingJob::new(
                worksheet(),
                answers(json!({ "match": [0, 1], "gaps": { "0": "amsterdam " } })),
                ScoringConfig::default_config(),
            )
            .mark()
            .unwrap()
        };
        let (a, b) = (make(), make());
        assert_eq!(a.tasks, b.tasks);
        assert_eq!(a.mark, b.mark);
    }

    #[test]
    fn test_matching_answer_saved_as_right_labels() {
        let records = vec![record(
            "m",
            "matching",
            0,
            json!({ "pairs": [{ "left": "A", "right": "Paris" }, { "left": "B", "right": "Berlin" }], "points": 2 }),
        )];
        let mark = |answer: Value| {
            MarkingJob::new(records.clone(), answers(json!({ "m": answer })), ScoringConfig::default_config())
                .mark()
                .unwrap()
        };

        let full = mark(json!("[\"Paris\",\"Berlin\"]"));
        assert_eq!(full.mark.earned, 2.0);
        assert!(full.warnings().is_empty());

        let half = mark(json!("[\"Paris\",\"\"]"));
        assert_eq!(half.mark.earned, 1.0);
        assert!(half.warnings().is_empty());

        assert_eq!(mark(json!({ "A": "paris", "B": "BERLIN" })).mark.earned, 0.0);
    }

    #[test]
    fn test_parsed_tasks_mark_like_records() {
        let config = ScoringConfig::default_config();
        let raw = answers(json!({ "choice": 2, "order": [1, 0, 2] }));
        let tasks = parse_tasks(&worksheet(), &config).unwrap();

        let from_records = MarkingJob::new(worksheet(), raw.clone(), config.clone()).mark().unwrap();
        let from_tasks = MarkingJob::from_tasks(tasks, raw, config).mark().unwrap();
        assert_eq!(from_records.tasks, from_tasks.tasks);
        assert_eq!(from_records.mark, from_tasks.mark);
    }
}
