//! Blank feedback strategy: automatic scores carry no text.

use crate::error::MarkerError;
use crate::traits::feedback::{Feedback, FeedbackEntry};
use crate::types::TaskResult;

#[derive(Debug, Default)]
pub struct BlankFeedback;

impl Feedback for BlankFeedback {
    fn assemble_feedback(&self, results: &[TaskResult]) -> Result<Vec<FeedbackEntry>, MarkerError> {
        Ok(results
            .iter()
            .map(|r| FeedbackEntry {
                task: r.task_id.clone(),
                message: String::new(),
            })
            .collect())
    }
}
