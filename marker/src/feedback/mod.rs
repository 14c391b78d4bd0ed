//! # Feedback Strategies Module
//!
//! This module provides pluggable feedback strategies for the marker system.
//! Each strategy implements the [`Feedback`](crate::traits::feedback::Feedback) trait and produces
//! one [`FeedbackEntry`](crate::traits::feedback::FeedbackEntry) per task result.
//!
//! ## Available Strategies
//!
//! - [`blank_feedback`]: Empty feedback text; teachers write their own. This is the default.
//! - [`auto_feedback`]: Short generated summaries built from matched and missed answer-key items.

pub mod auto_feedback;
pub mod blank_feedback;

use crate::traits::feedback::Feedback;
use util::scoring_config::FeedbackScheme;

/// The strategy configured by `feedback_scheme`.
pub fn for_scheme(scheme: FeedbackScheme) -> Box<dyn Feedback + Send + Sync> {
    match scheme {
        FeedbackScheme::Blank => Box::new(blank_feedback::BlankFeedback),
        FeedbackScheme::Auto => Box::new(auto_feedback::AutoFeedback),
    }
}
