//! # Mark Report Module
//!
//! This module defines the data structures and response envelope for returning grading results from the marker system.
//!
//! ## Overview
//!
//! - [`MarkReport`]: Per-task results in worksheet order, the overall mark and the percentage.
//! - [`MarkReportResponse`]: A response envelope that wraps a [`MarkReport`] with success and message fields.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Grading complete.",
//!   "data": {
//!     "created_at": "2025-05-01T10:00:00Z",
//!     "submission_id": "s1",
//!     "mark": { "earned": 3.0, "total": 4.0 },
//!     "percentage": 75,
//!     "tasks": [
//!       {
//!         "task_id": "q1",
//!         "task_type": "single_choice",
//!         "order_index": 0,
//!         "earned": 1.0,
//!         "total": 1.0,
//!         "outcome": "scored",
//!         "feedback": "",
//!         "warnings": []
//!       }
//!     ]
//!   }
//! }
//! ```

use crate::types::Outcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub earned: f64,
    pub total: f64,
}

/// One task's line in a mark report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTask {
    pub task_id: String,
    /// The type tag as stored, which may be a spelling the marker does not recognize.
    pub task_type: String,
    pub order_index: i64,
    pub earned: f64,
    pub total: f64,
    pub outcome: Outcome,
    pub feedback: String,
    /// Non-fatal problems met while marking this task.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Represents the final report generated after marking a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkReport {
    /// RFC 3339 timestamp of the marking run.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    pub mark: Score,
    pub percentage: u32,
    pub tasks: Vec<ReportTask>,
}

impl MarkReport {
    pub fn task(&self, task_id: &str) -> Option<&ReportTask> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Every warning in the report, prefixed with its task id.
    pub fn warnings(&self) -> Vec<String> {
        self.tasks
            .iter()
            .flat_map(|t| t.warnings.iter().map(move |w| format!("{}: {w}", t.task_id)))
            .collect()
    }
}

/// The response envelope for grading results.
#[derive(Debug, Serialize)]
pub struct MarkReportResponse {
    /// Indicates the grading was successful.
    success: bool,
    /// A human-readable message for the client.
    message: String,
    /// The detailed grading report.
    data: MarkReport,
}

impl MarkReportResponse {
    pub fn data(&self) -> &MarkReport {
        &self.data
    }
}

/// Enables ergonomic conversion from [`MarkReport`] to [`MarkReportResponse`].
impl From<MarkReport> for MarkReportResponse {
    fn from(report: MarkReport) -> Self {
        MarkReportResponse {
            success: true,
            message: "Grading complete.".to_string(),
            data: report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn report_task(id: &str, warnings: &[&str]) -> ReportTask {
        ReportTask {
            task_id: id.to_string(),
            task_type: "essay".to_string(),
            order_index: 0,
            earned: 1.0,
            total: 2.0,
            outcome: Outcome::Scored,
            feedback: "Well done".to_string(),
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn report(tasks: Vec<ReportTask>) -> MarkReport {
        MarkReport {
            created_at: "2025-05-01T10:00:00+00:00".to_string(),
            submission_id: Some("abc123".to_string()),
            mark: Score {
                earned: 1.0,
                total: 2.0,
            },
            percentage: 50,
            tasks,
        }
    }

    #[test]
    fn test_mark_report_response_serialization() {
        let response: MarkReportResponse = report(vec![report_task("q1", &[])]).into();
        let value: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Grading complete.");
        assert_eq!(value["data"]["submission_id"], "abc123");
        assert_eq!(value["data"]["percentage"], 50);
        assert_eq!(value["data"]["mark"]["earned"], 1.0);
        assert_eq!(value["data"]["tasks"][0]["task_id"], "q1");
        assert_eq!(value["data"]["tasks"][0]["outcome"], "scored");
        assert!(value["data"]["tasks"][0].get("warnings").is_none());
    }

    #[test]
    fn test_warnings_are_collected_per_task() {
        let r = report(vec![
            report_task("q1", &["unsupported task type 'x'"]),
            report_task("q2", &[]),
        ]);
        assert_eq!(r.warnings(), vec!["q1: unsupported task type 'x'"]);
        assert!(r.task("q2").is_some());
        assert!(r.task("q3").is_none());
    }

    #[test]
    fn test_round_trip_json() {
        let r = report(vec![report_task("q1", &["w"])]);
        let json = serde_json::to_string(&r).unwrap();
        let back: MarkReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
