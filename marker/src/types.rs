//! # Types Module
//!
//! Core data structures shared by the parsers, comparators and scorer.
//!
//! - [`TaskRecord`] is a task exactly as the storage layer hands it over: a type tag and a loosely
//!   typed JSON `content` object.
//! - [`Task`] is the parsed form. Its [`TaskKind`] is a closed variant type with one variant per
//!   task kind, each carrying strongly typed content, so every `match` over it is exhaustive.
//! - [`NormalizedAnswer`] is the canonical in-memory answer shape the comparators consume.
//! - [`TaskResult`] is the outcome of scoring one task.

use crate::error::MarkerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Every task kind the worksheet editor can produce.
///
/// Serializes to the canonical spelling; older spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "multiple-choice", alias = "multiple_choice")]
    MultipleChoice,
    #[serde(rename = "single_choice", alias = "single-choice")]
    SingleChoice,
    #[serde(rename = "short_answer", alias = "short-answer")]
    ShortAnswer,
    #[serde(rename = "essay")]
    Essay,
    #[serde(rename = "open-question", alias = "open_question")]
    OpenQuestion,
    #[serde(rename = "matching")]
    Matching,
    #[serde(rename = "ordering")]
    Ordering,
    #[serde(rename = "fill_gaps", alias = "fill-gaps")]
    FillGaps,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "information")]
    Information,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::MultipleChoice => "multiple-choice",
            TaskType::SingleChoice => "single_choice",
            TaskType::ShortAnswer => "short_answer",
            TaskType::Essay => "essay",
            TaskType::OpenQuestion => "open-question",
            TaskType::Matching => "matching",
            TaskType::Ordering => "ordering",
            TaskType::FillGaps => "fill_gaps",
            TaskType::Text => "text",
            TaskType::Information => "information",
        }
    }
}

impl FromStr for TaskType {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "multiple-choice" | "multiple_choice" => Ok(TaskType::MultipleChoice),
            "single_choice" | "single-choice" => Ok(TaskType::SingleChoice),
            "short_answer" | "short-answer" => Ok(TaskType::ShortAnswer),
            "essay" => Ok(TaskType::Essay),
            "open-question" | "open_question" => Ok(TaskType::OpenQuestion),
            "matching" => Ok(TaskType::Matching),
            "ordering" => Ok(TaskType::Ordering),
            "fill_gaps" | "fill-gaps" => Ok(TaskType::FillGaps),
            "text" => Ok(TaskType::Text),
            "information" => Ok(TaskType::Information),
            other => Err(MarkerError::UnsupportedTaskType(other.to_string())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task row as fetched from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub task_type: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub order_index: i64,
}

/// A worksheet as exported from storage: its id, an optional title and its task rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

/// Content of single- and multiple-choice tasks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChoiceContent {
    pub options: Vec<String>,
    pub correct_answer: Option<usize>,
    /// Answer key of the multi-select editor. Only consulted under `MultiSelectPolicy::ExactSet`.
    pub correct_answers: Vec<usize>,
}

/// Content of free-text tasks and of tasks whose type is not recognized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreeTextContent {
    pub correct_answer: Option<String>,
    /// Further accepted answers (`expectedAnswers`), each worth full points.
    pub accepted_answers: Vec<String>,
}

impl FreeTextContent {
    /// All answers that earn full points, `correctAnswer` first.
    pub fn answer_key(&self) -> impl Iterator<Item = &str> {
        self.correct_answer
            .iter()
            .chain(self.accepted_answers.iter())
            .map(String::as_str)
    }

    pub fn has_answer_key(&self) -> bool {
        self.answer_key().next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchingContent {
    pub pairs: Vec<MatchPair>,
    /// Left labels in display order; answers keyed by index resolve through this.
    pub left_items: Vec<String>,
    /// Right labels in display order; numeric answer values resolve through this.
    pub right_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderingContent {
    pub items: Vec<String>,
    pub correct_order: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillGapsContent {
    pub text: Option<String>,
    pub gaps: Vec<String>,
    pub gap_answers: Vec<String>,
}

/// Strongly typed task configuration, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    MultipleChoice(ChoiceContent),
    SingleChoice(ChoiceContent),
    /// `short_answer`, `essay` and `open-question`.
    FreeText(FreeTextContent),
    Matching(MatchingContent),
    Ordering(OrderingContent),
    FillGaps(FillGapsContent),
    Text,
    Information,
    /// A `task_type` outside the known set; scored by the default rule.
    Unrecognized(FreeTextContent),
}

/// A parsed task, ready for normalization and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    /// `None` when the stored type tag is not recognized.
    pub task_type: Option<TaskType>,
    /// The type tag exactly as stored.
    pub raw_type: String,
    pub order_index: i64,
    pub title: Option<String>,
    /// Maximum score; `content.points`, defaulting to 1.
    pub points: f64,
    pub kind: TaskKind,
}

impl Task {
    pub fn points(&self) -> f64 {
        self.points
    }

    /// Informational tasks never expect an answer.
    pub fn expects_answer(&self) -> bool {
        !matches!(self.kind, TaskKind::Text | TaskKind::Information)
    }
}

/// An answer in the canonical shape for its task kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedAnswer {
    /// No answer given. Distinct from a present falsy answer such as index `0`.
    Missing,
    Choice(usize),
    Selection(Vec<usize>),
    Text(String),
    /// Left label to right label.
    Matching(BTreeMap<String, String>),
    Order(Vec<usize>),
    /// Gap answers in left-to-right order, already trimmed and lower-cased.
    Gaps(Vec<String>),
}

impl NormalizedAnswer {
    pub fn is_missing(&self) -> bool {
        matches!(self, NormalizedAnswer::Missing)
    }
}

/// How a task's score came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Compared against an answer key.
    Scored,
    /// No (usable) answer was given.
    Unanswered,
    /// The task has no answer key; a teacher has to grade it.
    NeedsReview,
    /// Informational content; never scored.
    NotGradable,
}

/// Represents the result of scoring a single task.
///
/// `matched` and `missed` hold human-readable descriptions of the answer-key items that were or
/// were not satisfied (option indices, pair labels, gap numbers), for use by feedback strategies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResult {
    pub task_id: String,
    /// Points awarded, always within `[0, possible]`.
    pub awarded: f64,
    pub possible: f64,
    pub outcome: Outcome,
    pub matched: Vec<String>,
    pub missed: Vec<String>,
}

impl TaskResult {
    pub fn scored(
        task_id: &str,
        awarded: f64,
        possible: f64,
        matched: Vec<String>,
        missed: Vec<String>,
    ) -> Self {
        let awarded = if awarded.is_finite() {
            awarded.clamp(0.0, possible)
        } else {
            0.0
        };
        TaskResult {
            task_id: task_id.to_string(),
            awarded,
            possible,
            outcome: Outcome::Scored,
            matched,
            missed,
        }
    }

    pub fn unanswered(task_id: &str, possible: f64) -> Self {
        Self::zero(task_id, possible, Outcome::Unanswered)
    }

    pub fn needs_review(task_id: &str, possible: f64) -> Self {
        Self::zero(task_id, possible, Outcome::NeedsReview)
    }

    pub fn not_gradable(task_id: &str, possible: f64) -> Self {
        Self::zero(task_id, possible, Outcome::NotGradable)
    }

    fn zero(task_id: &str, possible: f64, outcome: Outcome) -> Self {
        TaskResult {
            task_id: task_id.to_string(),
            awarded: 0.0,
            possible,
            outcome,
            matched: vec![],
            missed: vec![],
        }
    }

    pub fn is_full_marks(&self) -> bool {
        self.outcome == Outcome::Scored && self.possible > 0.0 && self.awarded >= self.possible
    }
}
