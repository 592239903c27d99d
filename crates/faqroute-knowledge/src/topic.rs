//! FAQ topic and document format (`shop.faq.json`).

use serde::{Deserialize, Serialize};

/// A named FAQ subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable routing key. Downstream consumers persist and compare it.
    pub id: String,
    /// Display label, not used in matching.
    #[serde(default)]
    pub title: String,
    /// Raw keyword phrases, normalized at index time.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Canned answer rendered on a match.
    #[serde(default)]
    pub answer: String,
}

impl Topic {
    pub fn new(id: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }
}

/// Top-level FAQ document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Language the keyword lists are written in.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

fn default_version() -> u32 {
    1
}
fn default_language() -> String {
    "de".into()
}
