//!
//! Answer Parser Module
//!
//! This module converts a stored answer (an opaque JSON value) into the [`NormalizedAnswer`]
//! shape for its task kind. Two submission screens have written answers over time, so every
//! kind accepts more than one encoding:
//!
//! | kind | accepted encodings |
//! |---|---|
//! | multiple-choice | array of indices, JSON-encoded array, comma-separated string, bare index |
//! | single_choice | index, numeric string, one-element array |
//! | free text | string, number |
//! | matching | `{left label: right label}`, `{left index: right index}`, array of right labels or indices |
//! | ordering | array of indices |
//! | fill_gaps | array of strings, `{gap index: string}` |
//!
//! `null` and absent answers are always [`NormalizedAnswer::Missing`]; the index `0` is a real
//! answer.
//!
//! # Error Handling
//!
//! [`AnswerParser`] reports a present answer with the wrong shape as
//! [`MarkerError::MalformedAnswer`]. [`normalize_answer`] is the lenient entry point used during
//! marking: it logs the problem and treats the answer as missing.

use crate::error::MarkerError;
use crate::traits::parser::Parser;
use crate::types::{MatchingContent, NormalizedAnswer, Task, TaskKind};
use crate::utilities::json_values::{decode_embedded_json, read_index, read_index_list, read_text};
use crate::utilities::text_normalization::normalize_text;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;
use util::scoring_config::ScoringConfig;

/// Normalizes a raw answer for one task.
#[derive(Debug, Default)]
pub struct AnswerParser;

impl<'a> Parser<(&'a Task, Option<&'a Value>), NormalizedAnswer> for AnswerParser {
    fn parse(
        &self,
        input: (&'a Task, Option<&'a Value>),
        _config: &ScoringConfig,
    ) -> Result<NormalizedAnswer, MarkerError> {
        let (task, raw) = input;
        let raw = match raw {
            None | Some(Value::Null) => return Ok(NormalizedAnswer::Missing),
            Some(v) => v,
        };

        let malformed = |reason: &str| MarkerError::MalformedAnswer {
            task_id: task.id.clone(),
            reason: reason.to_string(),
        };

        match &task.kind {
            TaskKind::Text | TaskKind::Information => Ok(NormalizedAnswer::Missing),
            TaskKind::MultipleChoice(_) => parse_selection(raw)
                .map(|sel| sel.map_or(NormalizedAnswer::Missing, NormalizedAnswer::Selection))
                .ok_or_else(|| malformed("expected a list of option indices")),
            TaskKind::SingleChoice(_) => parse_single_choice(raw)
                .map(|c| c.map_or(NormalizedAnswer::Missing, NormalizedAnswer::Choice))
                .ok_or_else(|| malformed("expected a single option index")),
            TaskKind::FreeText(_) | TaskKind::Unrecognized(_) => read_text(raw)
                .map(NormalizedAnswer::Text)
                .ok_or_else(|| malformed("expected a text answer")),
            TaskKind::Matching(content) => parse_matching(content, raw)
                .map(NormalizedAnswer::Matching)
                .ok_or_else(|| malformed("expected a left-to-right mapping")),
            TaskKind::Ordering(_) => read_index_list(&decode_embedded_json(raw))
                .map(NormalizedAnswer::Order)
                .ok_or_else(|| malformed("expected a list of item indices")),
            TaskKind::FillGaps(_) => parse_gaps(raw)
                .map(NormalizedAnswer::Gaps)
                .ok_or_else(|| malformed("expected a list of gap answers")),
        }
    }
}

/// Lenient normalization used by the marking pipeline.
///
/// A malformed answer is logged and scored as if no answer had been given.
pub fn normalize_answer(task: &Task, raw: Option<&Value>, config: &ScoringConfig) -> NormalizedAnswer {
    match AnswerParser.parse((task, raw), config) {
        Ok(answer) => answer,
        Err(err) => {
            warn!(task_id = %task.id, error = %err, "Treating malformed answer as missing");
            NormalizedAnswer::Missing
        }
    }
}

/// `Some(None)` is a present but empty answer such as `""`.
fn parse_selection(raw: &Value) -> Option<Option<Vec<usize>>> {
    let decoded = decode_embedded_json(raw);
    match &decoded {
        Value::Array(_) => read_index_list(&decoded).map(Some),
        Value::String(s) if s.trim().is_empty() => Some(None),
        Value::String(s) => s
            .split(',')
            .map(|part| part.trim().parse::<usize>().ok())
            .collect::<Option<Vec<_>>>()
            .map(Some),
        Value::Number(_) => read_index(&decoded).map(|i| Some(vec![i])),
        _ => None,
    }
}

fn parse_single_choice(raw: &Value) -> Option<Option<usize>> {
    let decoded = decode_embedded_json(raw);
    match &decoded {
        Value::Array(items) => match items.as_slice() {
            [] => Some(None),
            [only] => read_index(only).map(Some),
            _ => None,
        },
        Value::String(s) if s.trim().is_empty() => Some(None),
        other => read_index(other).map(Some),
    }
}

fn parse_matching(content: &MatchingContent, raw: &Value) -> Option<BTreeMap<String, String>> {
    match decode_embedded_json(raw) {
        Value::Object(map) => matching_from_object(content, &map),
        Value::Array(items) => {
            // Position i holds the choice for left item i: a right label or a right index.
            let mut mapping = BTreeMap::new();
            for (i, item) in items.iter().enumerate() {
                if is_unselected(item) {
                    continue;
                }
                let left = content.left_items.get(i)?;
                mapping.insert(left.clone(), resolve_right(content, item)?);
            }
            Some(mapping)
        }
        _ => None,
    }
}

fn is_unselected(item: &Value) -> bool {
    match item {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// A string naming a right item wins over reading it as an index, so `"1"` stays the label `1`.
fn resolve_right(content: &MatchingContent, item: &Value) -> Option<String> {
    if let Value::String(s) = item {
        let is_label = content.right_items.iter().any(|r| r == s)
            || content.pairs.iter().any(|p| &p.right == s);
        if is_label {
            return Some(s.clone());
        }
    }
    match read_index(item) {
        Some(index) => content.right_items.get(index).cloned(),
        None => item.as_str().map(str::to_string),
    }
}

fn matching_from_object(
    content: &MatchingContent,
    map: &Map<String, Value>,
) -> Option<BTreeMap<String, String>> {
    let mut mapping = BTreeMap::new();
    for (key, value) in map {
        let left = resolve_left(content, key);
        let right = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(_) => {
                let index = read_index(value)?;
                content
                    .right_items
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| index.to_string())
            }
            _ => return None,
        };
        mapping.insert(left, right);
    }
    Some(mapping)
}

/// A key that names a left item is used as is; otherwise a numeric key indexes `left_items`.
fn resolve_left(content: &MatchingContent, key: &str) -> String {
    if content.left_items.iter().any(|l| l == key) {
        return key.to_string();
    }
    key.trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| content.left_items.get(i))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

fn parse_gaps(raw: &Value) -> Option<Vec<String>> {
    let gaps = match decode_embedded_json(raw) {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => Some(String::new()),
                other => read_text(other),
            })
            .collect::<Option<Vec<_>>>()?,
        Value::Object(map) => {
            let mut by_index = BTreeMap::new();
            for (key, value) in &map {
                let index = key.trim().parse::<usize>().ok()?;
                let text = match value {
                    Value::Null => String::new(),
                    other => read_text(other)?,
                };
                by_index.insert(index, text);
            }
            let len = by_index.keys().next_back().map_or(0, |last| last + 1);
            (0..len)
                .map(|i| by_index.remove(&i).unwrap_or_default())
                .collect()
        }
        Value::String(s) => vec![s],
        _ => return None,
    };
    Some(gaps.iter().map(|g| normalize_text(g)).collect())
}
