//! Task Record Parser
//!
//! This module provides the [`TaskParser`] for turning a stored [`TaskRecord`] into a typed
//! [`Task`]. The stored `content` object is read leniently: every field the worksheet editors have
//! ever written is accepted, and a field of the wrong shape is treated as absent (with a warning)
//! so a single broken task never blocks grading of the rest of the worksheet.
//!
//! # Content fields
//!
//! | kind | fields |
//! |---|---|
//! | choice | `options`, `correctAnswer`, `correctAnswers` |
//! | free text | `correctAnswer`, `expectedAnswers` |
//! | matching | `pairs: [{left, right}]`, or `leftItems` + `rightItems` + `correctMatches` |
//! | ordering | `items`, `correctOrder` |
//! | fill gaps | `text` (or `textWithGaps`), `gaps`, `gapAnswers` |
//!
//! Every kind reads `points` (default 1) and `title` (or `question`).
//!
//! # Error Handling
//!
//! Only a record whose `content` is neither an object nor `null` fails, with
//! [`MarkerError::InvalidContent`]. An unknown `task_type` parses to [`TaskKind::Unrecognized`];
//! callers that want to surface it call [`TaskType::from_str`](std::str::FromStr) themselves.

use crate::error::MarkerError;
use crate::traits::parser::Parser;
use crate::types::{
    ChoiceContent, FillGapsContent, FreeTextContent, MatchPair, MatchingContent, OrderingContent,
    Task, TaskKind, TaskRecord, TaskType,
};
use crate::utilities::json_values::{
    decode_embedded_json, read_index, read_index_list, read_points, read_string_list, read_text,
};
use serde_json::{Map, Value};
use tracing::warn;
use util::scoring_config::ScoringConfig;

/// Parses stored task records into [`Task`]s.
#[derive(Debug, Default)]
pub struct TaskParser;

impl<'a> Parser<&'a TaskRecord, Task> for TaskParser {
    fn parse(&self, record: &'a TaskRecord, _config: &ScoringConfig) -> Result<Task, MarkerError> {
        let empty = Map::new();
        let content = match &record.content {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(MarkerError::InvalidContent {
                    task_id: record.id.clone(),
                    reason: format!("content must be an object, found {}", json_kind(other)),
                });
            }
        };

        let reader = ContentReader {
            task_id: &record.id,
            content,
        };
        let task_type = record.task_type.parse::<TaskType>().ok();

        let kind = match task_type {
            Some(TaskType::MultipleChoice) => TaskKind::MultipleChoice(reader.choice(false)),
            Some(TaskType::SingleChoice) => TaskKind::SingleChoice(reader.choice(true)),
            Some(TaskType::ShortAnswer | TaskType::Essay | TaskType::OpenQuestion) => {
                TaskKind::FreeText(reader.free_text())
            }
            Some(TaskType::Matching) => TaskKind::Matching(reader.matching()),
            Some(TaskType::Ordering) => TaskKind::Ordering(reader.ordering()),
            Some(TaskType::FillGaps) => TaskKind::FillGaps(reader.fill_gaps()),
            Some(TaskType::Text) => TaskKind::Text,
            Some(TaskType::Information) => TaskKind::Information,
            None => TaskKind::Unrecognized(reader.free_text()),
        };

        let title = reader
            .get("title")
            .or_else(|| reader.get("question"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Task {
            id: record.id.clone(),
            task_type,
            raw_type: record.task_type.clone(),
            order_index: record.order_index,
            title,
            points: read_points(reader.get("points")),
            kind,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct ContentReader<'a> {
    task_id: &'a str,
    content: &'a Map<String, Value>,
}

impl<'a> ContentReader<'a> {
    /// A present, non-null field.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.content.get(key).filter(|v| !v.is_null())
    }

    /// Reads `key` with `read`; a present value that `read` rejects is logged and dropped.
    fn field<T>(&self, key: &str, read: impl Fn(&Value) -> Option<T>) -> Option<T> {
        let raw = self.get(key)?;
        let value = read(raw).or_else(|| read(&decode_embedded_json(raw)));
        if value.is_none() {
            warn!(
                task_id = self.task_id,
                field = key,
                "Ignoring content field with unexpected shape"
            );
        }
        value
    }

    fn strings(&self, key: &str) -> Vec<String> {
        self.field(key, read_string_list).unwrap_or_default()
    }

    fn indices(&self, key: &str) -> Vec<usize> {
        self.field(key, read_index_list).unwrap_or_default()
    }

    fn choice(&self, single: bool) -> ChoiceContent {
        let correct_answers = self.indices("correctAnswers");
        let mut correct_answer = self.field("correctAnswer", read_index);
        if single && correct_answer.is_none() {
            correct_answer = correct_answers.first().copied();
        }
        ChoiceContent {
            options: self.strings("options"),
            correct_answer,
            correct_answers,
        }
    }

    fn free_text(&self) -> FreeTextContent {
        FreeTextContent {
            correct_answer: self
                .field("correctAnswer", read_text)
                .filter(|s| !s.trim().is_empty()),
            accepted_answers: self
                .strings("expectedAnswers")
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
        }
    }

    fn matching(&self) -> MatchingContent {
        let mut left_items = self.strings("leftItems");
        let mut right_items = self.strings("rightItems");

        let pairs = match self.field("pairs", read_pairs) {
            Some(pairs) => pairs,
            None => {
                // Older editor: correctMatches[i] is the right index for left item i.
                let correct_matches = self.indices("correctMatches");
                left_items
                    .iter()
                    .zip(correct_matches.iter())
                    .filter_map(|(left, &r)| {
                        right_items.get(r).map(|right| MatchPair {
                            left: left.clone(),
                            right: right.clone(),
                        })
                    })
                    .collect()
            }
        };

        if left_items.is_empty() {
            left_items = pairs.iter().map(|p| p.left.clone()).collect();
        }
        if right_items.is_empty() {
            right_items = pairs.iter().map(|p| p.right.clone()).collect();
        }

        MatchingContent {
            pairs,
            left_items,
            right_items,
        }
    }

    fn ordering(&self) -> OrderingContent {
        OrderingContent {
            items: self.strings("items"),
            correct_order: self.indices("correctOrder"),
        }
    }

    fn fill_gaps(&self) -> FillGapsContent {
        let text = self
            .get("text")
            .or_else(|| self.get("textWithGaps"))
            .and_then(Value::as_str)
            .map(str::to_string);
        FillGapsContent {
            text,
            gaps: self.strings("gaps"),
            gap_answers: self.strings("gapAnswers"),
        }
    }
}

fn read_pairs(value: &Value) -> Option<Vec<MatchPair>> {
    value
        .as_array()?
        .iter()
        .map(|pair| {
            Some(MatchPair {
                left: read_text(pair.get("left")?)?,
                right: read_text(pair.get("right")?)?,
            })
        })
        .collect()
}
