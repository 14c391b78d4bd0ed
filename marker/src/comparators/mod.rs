//! # Comparators
//!
//! This module provides one comparator per task kind. Each comparator implements the
//! [`AnswerComparator`](crate::traits::comparator::AnswerComparator) trait for the typed content
//! of its kind and turns a normalized answer into a [`TaskResult`](crate::types::TaskResult).
//!
//! The available comparators are:
//! - [`choice_comparator`]: Single- and multiple-choice, all or nothing.
//! - [`matching_comparator`]: Partial credit per correct pair.
//! - [`ordering_comparator`]: All or nothing on the full order.
//! - [`gap_comparator`]: Partial credit per correct gap, case-insensitive.
//! - [`text_comparator`]: The default rule for free text and unrecognized kinds.

pub mod choice_comparator;
pub mod gap_comparator;
pub mod matching_comparator;
pub mod ordering_comparator;
pub mod text_comparator;
