//! Parser Trait
//!
//! This module defines the [`Parser`] trait, which provides a generic interface for parsing
//! loosely typed storage data into strongly-typed Rust structures. Implementations of this trait
//! are responsible for validating the input and converting it into the appropriate domain
//! model, returning detailed errors on failure.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//! use marker::traits::parser::Parser;
//! use serde_json::Value;
//! use util::scoring_config::ScoringConfig;
//!
//! struct MyJsonParser;
//! struct MyTask;
//!
//! impl<'a> Parser<&'a Value, MyTask> for MyJsonParser {
//!     fn parse(&self, raw: &'a Value, _config: &ScoringConfig) -> Result<MyTask, MarkerError> {
//!         if raw.is_object() {
//!             Ok(MyTask)
//!         } else {
//!             Err(MarkerError::InvalidJson("expected an object".into()))
//!         }
//!     }
//! }
//! ```

use util::scoring_config::ScoringConfig;

use crate::error::MarkerError;

/// A generic trait for parsing data into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `Input` - The input type to be parsed.
/// * `Output` - The output type produced by the parser.
pub trait Parser<Input, Output> {
    /// Parse an input value into the target type.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkerError`] if the input does not conform to the expected schema
    /// or cannot be parsed.
    fn parse(&self, input: Input, config: &ScoringConfig) -> Result<Output, MarkerError>;
}
