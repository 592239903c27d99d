//! # faqroute Intent
//!
//! Decides per utterance whether the assistant answers from the FAQ
//! knowledge base or hands the turn to product search.
//!
//! ## Pipeline
//! ```text
//! raw text
//!   ↓ normalize (once)
//! ProductIntentGate ── fires, no strong FAQ signal ──▶ NoMatch
//!   ↓ otherwise
//! KeywordMatcher ── best topic by hit density (first wins ties)
//!   ↓
//! score >= threshold ? FaqMatch(topic_id, score) : NoMatch
//! ```
//!
//! | Gate rule       | Fires on                                               |
//! |-----------------|--------------------------------------------------------|
//! | Currency        | `€`, `" eur"`                                          |
//! | Budget          | standalone number + `unter` / `bis` / `max` / `budget` |
//! | Recommendation  | "ich suche", "empfehl", ... + a catalog category name  |
//!
//! Strong FAQ vocabulary ("retoure", "lieferzeit", "paypal", ...) suppresses
//! the gate, so "Retoure für meine Bestellung unter 30€" still reaches the
//! matcher.

pub mod classifier;
pub mod gate;
pub mod matcher;

pub use classifier::{classify, ClassificationOutcome, IntentClassifier};
pub use gate::{GateTrigger, ProductIntentGate};
pub use matcher::{match_topic, MatchResult};
