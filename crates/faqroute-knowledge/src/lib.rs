//! # faqroute Knowledge
//!
//! Read-only data the classifier matches against, loaded once per process.
//!
//! ## Design
//! - **Ordered topics**: the knowledge base is a `Vec`, never a map, so the
//!   first topic wins a score tie on every run
//! - **Precomputed keyword sets**: keywords are normalized and de-duplicated
//!   at load time, never per request
//! - **Category index**: normalized catalog category names, consulted only by
//!   the product intent gate
//! - **File-based**: plain JSON documents, no database
//!
//! ## How it works
//! ```text
//! shop.faq.json ──▶ FaqDocument ──▶ KnowledgeBase (Arc, shared)
//! catalog.json  ──▶ [CatalogEntry] ──▶ CategoryIndex (Arc, shared)
//! ```

pub mod categories;
pub mod store;
pub mod topic;

pub use categories::{CatalogEntry, CategoryIndex, NO_CATEGORY};
pub use store::{IndexedTopic, KnowledgeBase};
pub use topic::{FaqDocument, Topic};
