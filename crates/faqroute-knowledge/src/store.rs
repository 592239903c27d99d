//! Knowledge base: ordered FAQ topics with precomputed keyword sets.

use faqroute_core::error::{FaqRouteError, Result};
use faqroute_core::text::normalize;
use std::collections::HashSet;
use std::path::Path;

use crate::topic::{FaqDocument, Topic};

/// A topic plus its normalized, de-duplicated, non-empty keywords.
#[derive(Debug, Clone)]
pub struct IndexedTopic {
    pub topic: Topic,
    keywords: Vec<String>,
}

impl IndexedTopic {
    fn new(topic: Topic) -> Self {
        let mut seen = HashSet::new();
        let keywords = topic
            .keywords
            .iter()
            .map(|k| normalize(k))
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();
        Self { topic, keywords }
    }

    pub fn id(&self) -> &str {
        &self.topic.id
    }

    /// Normalized keyword set. Each entry is unique.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Immutable, ordered FAQ index. Topic order decides score ties.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    version: u32,
    language: String,
    topics: Vec<IndexedTopic>,
}

impl KnowledgeBase {
    /// Build a knowledge base from topics in the given order.
    ///
    /// Fails if two topics share an id.
    pub fn new(topics: Vec<Topic>) -> Result<Self> {
        Self::from_document(FaqDocument {
            version: 1,
            language: "de".into(),
            topics,
        })
    }

    /// An empty knowledge base. Every classification against it is a miss.
    pub fn empty() -> Self {
        Self {
            version: 1,
            language: "de".into(),
            topics: Vec::new(),
        }
    }

    pub fn from_document(doc: FaqDocument) -> Result<Self> {
        {
            let mut ids = HashSet::new();
            for topic in &doc.topics {
                if !ids.insert(topic.id.as_str()) {
                    return Err(FaqRouteError::DuplicateTopicId(topic.id.clone()));
                }
            }
        }

        let topics: Vec<IndexedTopic> = doc.topics.into_iter().map(IndexedTopic::new).collect();
        for t in topics.iter().filter(|t| t.keywords.is_empty()) {
            tracing::warn!("⚠️ FAQ topic '{}' has no usable keywords and can never match", t.id());
        }

        Ok(Self {
            version: doc.version,
            language: doc.language,
            topics,
        })
    }

    /// Parse a `shop.faq.json` document.
    pub fn from_json(content: &str) -> Result<Self> {
        let doc: FaqDocument = serde_json::from_str(content)
            .map_err(|e| FaqRouteError::KnowledgeBase(format!("Failed to parse FAQ document: {e}")))?;
        Self::from_document(doc)
    }

    /// Load a `shop.faq.json` document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FaqRouteError::KnowledgeBase(format!("Failed to read {}: {e}", path.display()))
        })?;
        let kb = Self::from_json(&content)?;
        tracing::info!(
            "📚 Loaded {} FAQ topics (v{}, {}) from {}",
            kb.len(),
            kb.version,
            kb.language,
            path.display()
        );
        Ok(kb)
    }

    /// Topics in catalog order.
    pub fn topics(&self) -> &[IndexedTopic] {
        &self.topics
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id() == id).map(|t| &t.topic)
    }

    /// Stored answer for a topic id.
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.topic(id).map(|t| t.answer.as_str())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
