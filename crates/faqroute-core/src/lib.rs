//! # faqroute core
//!
//! Shared building blocks for the FAQ / product intent router:
//! error type, configuration, heuristic rule lists and the text normalizer
//! that every other stage matches against.

pub mod config;
pub mod error;
pub mod rules;
pub mod text;

pub use config::FaqRouteConfig;
pub use error::{FaqRouteError, Result};
pub use rules::IntentRules;
pub use text::normalize;

/// Minimum hit-density score a topic needs to be accepted as an FAQ answer.
pub const DEFAULT_FAQ_THRESHOLD: f64 = 0.10;
