//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which covers everything that can go wrong while
//! parsing task records, normalizing answers, scoring and updating submission state.
//!
//! Two variants are *non-fatal* by contract: [`MarkerError::UnsupportedTaskType`] and
//! [`MarkerError::MalformedAnswer`]. The marking pipeline never aborts on them; it downgrades the
//! task to the default scoring rule or to "no answer" and records the message as a warning.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//! use marker::types::TaskType;
//!
//! let err = "crossword".parse::<TaskType>().unwrap_err();
//! assert!(matches!(err, MarkerError::UnsupportedTaskType(_)));
//! ```

use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    /// `task_type` is not one of the known task kinds.
    #[error("unsupported task type '{0}'")]
    UnsupportedTaskType(String),
    /// A stored answer is present but does not have the shape its task kind expects.
    #[error("malformed answer for task '{task_id}': {reason}")]
    MalformedAnswer { task_id: String, reason: String },
    /// A task record cannot be interpreted at all (e.g. content is not an object).
    #[error("invalid content for task '{task_id}': {reason}")]
    InvalidContent { task_id: String, reason: String },
    /// A manual score lies outside `[0, points]`.
    #[error("score {score} for task '{task_id}' is outside 0..={max}")]
    ScoreOutOfRange { task_id: String, score: f64, max: f64 },
    /// A task id was referenced that the worksheet does not contain.
    #[error("task '{0}' is not part of this worksheet")]
    UnknownTask(String),
    /// Two task records share the same id.
    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),
    /// JSON is malformed or does not match expected schema.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    /// I/O error (file not found, unreadable, too large).
    #[error("I/O error: {0}")]
    IoError(String),
}

impl MarkerError {
    /// Errors that downgrade a single task instead of failing the whole job.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MarkerError::UnsupportedTaskType(_) | MarkerError::MalformedAnswer { .. }
        )
    }
}
