//! Error types for faqroute.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FaqRouteError>;

#[derive(Debug, Error)]
pub enum FaqRouteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Topic ids are routing keys, so two topics may never share one.
    #[error("Duplicate topic id in knowledge base: {0}")]
    DuplicateTopicId(String),

    #[error("Catalog error: {0}")]
    Catalog(String),
}
