//! Grading orchestration over an explicit storage dependency.
//!
//! - [`submission_store`]: The [`SubmissionStore`](submission_store::SubmissionStore) trait and an
//!   in-memory implementation.
//! - [`grading_service`]: Auto-scoring, manual edits and the `submitted -> graded` transition.
//! - [`error`]: [`ServiceError`](error::ServiceError).

pub mod error;
pub mod grading_service;
pub mod submission_store;
