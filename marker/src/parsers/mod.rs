//! # Parsers
//!
//! This module turns loosely typed storage data into the marker's typed model.
//!
//! The parsers implemented in this module adhere to the [`Parser`](crate::traits::parser::Parser)
//! trait, ensuring a consistent interface for parsing different inputs.
//
//! The available parsers are:
//! - [`task_parser`]: Task records into [`Task`](crate::types::Task)s.
//! - [`answer_parser`]: Raw answers into [`NormalizedAnswer`](crate::types::NormalizedAnswer)s.

pub mod answer_parser;
pub mod task_parser;
