//!
//! Traits Module
//!
//! This module contains core traits used throughout the marker system for extensibility and abstraction.
//!
//! - [`comparator`]: Defines the per-kind answer comparison trait.
//! - [`feedback`]: Defines pluggable feedback strategies.
//! - [`parser`]: Defines the generic trait for parsing raw JSON into Rust types.
//!
//! Implement these traits to extend or customize the marker's behavior for new task kinds or feedback styles.

pub mod comparator;
pub mod feedback;
pub mod parser;
