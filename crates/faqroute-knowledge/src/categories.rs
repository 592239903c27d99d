//! Catalog category index, used only by the product intent gate.

use faqroute_core::error::{FaqRouteError, Result};
use faqroute_core::text::normalize;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Sentinel the catalog export uses for uncategorized products.
pub const NO_CATEGORY: &str = "(none)";

/// One product of a catalog export. Only the category is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub category: Option<String>,
}

/// Set of normalized, non-empty catalog category names.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    categories: HashSet<String>,
}

impl CategoryIndex {
    /// An index without categories: the recommendation rule never fires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw category names.
    pub fn from_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories = names
            .into_iter()
            .map(|n| normalize(n.as_ref()))
            .filter(|c| !c.is_empty() && c != NO_CATEGORY)
            .collect();
        Self { categories }
    }

    /// Build from catalog entries, skipping missing categories.
    pub fn from_catalog(entries: &[CatalogEntry]) -> Self {
        Self::from_categories(entries.iter().filter_map(|e| e.category.as_deref()))
    }

    /// Parse a catalog export: a JSON array of product objects.
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(content)
            .map_err(|e| FaqRouteError::Catalog(format!("Failed to parse catalog: {e}")))?;
        Ok(Self::from_catalog(&entries))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FaqRouteError::Catalog(format!("Failed to read {}: {e}", path.display()))
        })?;
        let index = Self::from_json(&content)?;
        tracing::info!("🏷️ Loaded {} catalog categories from {}", index.len(), path.display());
        Ok(index)
    }

    /// Exact lookup of an already normalized category name.
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// True if any known category occurs as a substring of `text`.
    pub fn mentioned_in(&self, text: &str) -> bool {
        self.categories.iter().any(|c| text.contains(c.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_categories_normalizes_and_filters() {
        let index = CategoryIndex::from_categories(["Kosmetik", "  SPORT  ", "", "(none)", "(None)", "kosmetik"]);
        assert_eq!(index.len(), 2);
        assert!(index.contains("kosmetik"));
        assert!(index.contains("sport"));
        assert!(!index.contains(NO_CATEGORY));
    }

    #[test]
    fn test_from_json_skips_missing_category() {
        let index = CategoryIndex::from_json(
            r#"[
                {"title": "Lippenstift", "category": "Kosmetik"},
                {"title": "Gutschein"},
                {"title": "Ball", "category": null},
                {"title": "Misc", "category": "(none)"},
                {"title": "Laufschuh", "category": "Sport & Outdoor"}
            ]"#,
        )
        .unwrap();
        let mut names: Vec<_> = index.iter().collect();
        names.sort();
        assert_eq!(names, vec!["kosmetik", "sport & outdoor"]);
    }

    #[test]
    fn test_mentioned_in() {
        let index = CategoryIndex::from_categories(["kosmetik"]);
        assert!(index.mentioned_in("ich suche naturkosmetik"));
        assert!(!index.mentioned_in("ich suche schuhe"));
        assert!(!CategoryIndex::new().mentioned_in("kosmetik"));
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(matches!(
            CategoryIndex::from_json(r#"{"category": "x"}"#),
            Err(FaqRouteError::Catalog(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"category": "Haushalt"}]"#).unwrap();
        let index = CategoryIndex::load(&path).unwrap();
        assert!(index.contains("haushalt"));
    }
}
