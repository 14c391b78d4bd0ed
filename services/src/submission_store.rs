//! Storage seam for the grading service.
//!
//! The service never reaches for a global client; it is handed a [`SubmissionStore`]. Saves are
//! whole-record replacements, so concurrent writers to the same submission are last-write-wins.

use crate::error::ServiceError;
use marker::submission::Submission;
use marker::types::{TaskRecord, Worksheet};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::RwLock;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'a>>;

pub trait SubmissionStore: Send + Sync {
    /// Task rows of a worksheet, in any order.
    fn fetch_tasks<'a>(&'a self, worksheet_id: &'a str) -> StoreFuture<'a, Vec<TaskRecord>>;

    fn fetch_submission<'a>(&'a self, submission_id: &'a str) -> StoreFuture<'a, Option<Submission>>;

    /// Inserts or replaces the submission with the same id.
    fn save_submission<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()>;
}

/// A [`SubmissionStore`] backed by in-process maps.
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    worksheets: RwLock<HashMap<String, Vec<TaskRecord>>>,
    submissions: RwLock<HashMap<String, Submission>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_worksheet(&self, worksheet: Worksheet) {
        self.worksheets
            .write()
            .await
            .insert(worksheet.id, worksheet.tasks);
    }

    pub async fn insert_submission(&self, submission: Submission) {
        self.submissions
            .write()
            .await
            .insert(submission.id.clone(), submission);
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn fetch_tasks<'a>(&'a self, worksheet_id: &'a str) -> StoreFuture<'a, Vec<TaskRecord>> {
        Box::pin(async move {
            self.worksheets
                .read()
                .await
                .get(worksheet_id)
                .cloned()
                .ok_or_else(|| ServiceError::worksheet_not_found(worksheet_id))
        })
    }

    fn fetch_submission<'a>(&'a self, submission_id: &'a str) -> StoreFuture<'a, Option<Submission>> {
        Box::pin(async move { Ok(self.submissions.read().await.get(submission_id).cloned()) })
    }

    fn save_submission<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.submissions
                .write()
                .await
                .insert(submission.id.clone(), submission.clone());
            Ok(())
        })
    }
}
