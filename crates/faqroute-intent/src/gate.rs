//! Product intent gate: a heuristic veto on FAQ routing.
//!
//! Shopping phrasing ("ich suche etwas für sport", "was passt unter 30€")
//! shares vocabulary with FAQ questions. When the gate fires, the classifier
//! skips keyword matching entirely, unless the text also carries a strong
//! FAQ signal.

use faqroute_core::rules::{contains_any, IntentRules};
use faqroute_knowledge::CategoryIndex;
use regex::Regex;
use std::sync::LazyLock;

static STANDALONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("valid numeral pattern"));

/// Which gate rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTrigger {
    /// Price mention (`€`, `" eur"`).
    Currency,
    /// Standalone number next to a budget word.
    Budget,
    /// Recommendation request naming a catalog category.
    Recommendation,
}

impl std::fmt::Display for GateTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Currency => write!(f, "currency"),
            Self::Budget => write!(f, "budget"),
            Self::Recommendation => write!(f, "recommendation"),
        }
    }
}

/// Gate over prepared (lowercased, non-empty) rule lists.
#[derive(Debug, Clone)]
pub struct ProductIntentGate {
    rules: IntentRules,
}

impl Default for ProductIntentGate {
    fn default() -> Self {
        Self::new(&IntentRules::default())
    }
}

impl ProductIntentGate {
    pub fn new(rules: &IntentRules) -> Self {
        Self {
            rules: rules.prepared(),
        }
    }

    pub fn rules(&self) -> &IntentRules {
        &self.rules
    }

    /// First rule that fires on already normalized `text`, if any.
    pub fn trigger(&self, text: &str, categories: &CategoryIndex) -> Option<GateTrigger> {
        if contains_any(text, &self.rules.currency_markers) {
            return Some(GateTrigger::Currency);
        }
        if contains_any(text, &self.rules.budget_words) && STANDALONE_NUMBER.is_match(text) {
            return Some(GateTrigger::Budget);
        }
        if contains_any(text, &self.rules.recommendation_phrases) && categories.mentioned_in(text) {
            return Some(GateTrigger::Recommendation);
        }
        None
    }

    pub fn is_product_intent(&self, text: &str, categories: &CategoryIndex) -> bool {
        self.trigger(text, categories).is_some()
    }

    pub fn has_strong_faq_signal(&self, text: &str) -> bool {
        contains_any(text, &self.rules.strong_faq_signals)
    }

    /// Gate fired and nothing overrides it: the text must not be FAQ-routed.
    pub fn vetoes(&self, text: &str, categories: &CategoryIndex) -> Option<GateTrigger> {
        self.trigger(text, categories)
            .filter(|_| !self.has_strong_faq_signal(text))
    }
}
