//! Heuristic trigger-word lists for the product intent gate.
//!
//! Every list is plain data: the gate only iterates over them, so a shop can
//! extend or replace a list from `config.toml` without code changes.
//! Omitted lists fall back to the built-in German defaults.

use serde::{Deserialize, Serialize};

use crate::text::is_separator;

/// Named trigger-word collections used by the gate and its override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRules {
    /// Substrings that mark a price mention (`€`, `" eur"`).
    #[serde(default = "default_currency_markers")]
    pub currency_markers: Vec<String>,
    /// Words that turn a standalone number into a budget.
    #[serde(default = "default_budget_words")]
    pub budget_words: Vec<String>,
    /// Shopping-request phrasing; only fires together with a catalog category.
    #[serde(default = "default_recommendation_phrases")]
    pub recommendation_phrases: Vec<String>,
    /// Unambiguous FAQ vocabulary that suppresses the gate.
    #[serde(default = "default_strong_faq_signals")]
    pub strong_faq_signals: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_currency_markers() -> Vec<String> {
    words(&["€", " eur"])
}

fn default_budget_words() -> Vec<String> {
    words(&["unter", "bis", "max", "budget"])
}

fn default_recommendation_phrases() -> Vec<String> {
    words(&[
        "empfiehl",
        "empfehl",
        "was passt",
        "ich brauche",
        "ich suche",
        "kannst du mir empfehlen",
    ])
}

fn default_strong_faq_signals() -> Vec<String> {
    words(&[
        "lieferzeit",
        "versanddauer",
        "retoure",
        "rückgabe",
        "widerruf",
        "paypal",
        "klarna",
        "kreditkarte",
        "tracking",
        "sendungsnummer",
        "zugestellt",
        "kundenservice",
        "kontakt",
        "garantie",
        "agb",
        "datenschutz",
        "rechnung",
        "mwst",
        "ust",
        "vat",
        "steuer",
    ])
}

impl Default for IntentRules {
    fn default() -> Self {
        Self {
            currency_markers: default_currency_markers(),
            budget_words: default_budget_words(),
            recommendation_phrases: default_recommendation_phrases(),
            strong_faq_signals: default_strong_faq_signals(),
        }
    }
}

impl IntentRules {
    /// Bring every entry into the shape of normalized text: lowercase, each
    /// separator run collapsed to one space. Blank entries are dropped.
    ///
    /// Edges are not trimmed: `" eur"` relies on its leading space.
    pub fn prepared(&self) -> Self {
        fn prep(list: &[String]) -> Vec<String> {
            list.iter()
                .map(|w| collapse_separators(&w.to_lowercase()))
                .filter(|w| !w.trim().is_empty())
                .collect()
        }
        Self {
            currency_markers: prep(&self.currency_markers),
            budget_words: prep(&self.budget_words),
            recommendation_phrases: prep(&self.recommendation_phrases),
            strong_faq_signals: prep(&self.strong_faq_signals),
        }
    }
}

fn collapse_separators(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_run = false;
    for c in word.chars() {
        if is_separator(c) {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// True if any entry of `list` occurs as a substring of `text`.
pub fn contains_any(text: &str, list: &[String]) -> bool {
    list.iter().any(|w| text.contains(w.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let rules = IntentRules::default();
        assert_eq!(rules.currency_markers, vec!["€", " eur"]);
        assert_eq!(rules.budget_words.len(), 4);
        assert!(rules.recommendation_phrases.contains(&"kannst du mir empfehlen".to_string()));
        assert_eq!(rules.strong_faq_signals.len(), 21);
        assert!(rules.strong_faq_signals.contains(&"rückgabe".to_string()));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let rules: IntentRules = toml::from_str(r#"strong_faq_signals = ["Lieferzeit", ""]"#).unwrap();
        assert_eq!(rules.budget_words, default_budget_words());

        let prepared = rules.prepared();
        assert_eq!(prepared.strong_faq_signals, vec!["lieferzeit"]);
    }

    #[test]
    fn test_prepared_keeps_leading_space() {
        let prepared = IntentRules::default().prepared();
        assert!(prepared.currency_markers.contains(&" eur".to_string()));
    }

    #[test]
    fn test_prepared_collapses_inner_whitespace() {
        let rules = IntentRules {
            recommendation_phrases: words(&["Was  passt", "ich\tbrauche"]),
            currency_markers: words(&["  EUR"]),
            ..IntentRules::default()
        };
        let prepared = rules.prepared();
        assert_eq!(prepared.recommendation_phrases, vec!["was passt", "ich brauche"]);
        assert_eq!(prepared.currency_markers, vec![" eur"]);
        assert!(contains_any(&crate::normalize("Was   passt zu Kosmetik?"), &prepared.recommendation_phrases));
    }

    #[test]
    fn test_contains_any() {
        let list = words(&["paypal", "klarna"]);
        assert!(contains_any("zahlen mit klarna?", &list));
        assert!(!contains_any("zahlen mit karte?", &list));
        assert!(!contains_any("", &list));
    }
}
