//! # Utilities
//!
//! This module contains various utility functions and modules used throughout the `marker` crate.
//!
//! - [`file_loader`]: Loading and size-checking the worksheet and submission JSON exports.
//! - [`json_values`]: Lenient readers for indices, strings and points in loosely typed JSON.
//! - [`text_normalization`]: The trim and lower-case rule used for every free-text comparison.

pub mod file_loader;
pub mod json_values;
pub mod text_normalization;
