//!
//! # Feedback Trait
//!
//! This module defines the [`Feedback`] trait and the [`FeedbackEntry`] struct, which are used to implement pluggable feedback strategies for the marker system.
//!
//! Each strategy turns the per-task [`TaskResult`]s of one marking job into one feedback text per task.
//!

use crate::error::MarkerError;
use crate::types::TaskResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    pub task: String,
    pub message: String,
}

/// A trait for pluggable feedback strategies in the marker system.
///
/// # Arguments
/// - `results`: A slice of [`TaskResult`]s for the submission.
///
/// # Returns
/// - `Ok(Vec<FeedbackEntry>)`: One entry per result, in the same order.
/// - `Err(MarkerError)`: If feedback generation fails.
pub trait Feedback {
    fn assemble_feedback(&self, results: &[TaskResult]) -> Result<Vec<FeedbackEntry>, MarkerError>;
}
