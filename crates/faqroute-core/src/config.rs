//! faqroute configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaqRouteError, Result};
use crate::rules::IntentRules;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqRouteConfig {
    /// Minimum hit-density score for an FAQ match.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Path of the FAQ knowledge base JSON document.
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: String,
    /// Path of the product catalog JSON (empty = no category index).
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default)]
    pub rules: IntentRules,
}

fn default_threshold() -> f64 { crate::DEFAULT_FAQ_THRESHOLD }
fn default_knowledge_base() -> String { "~/.faqroute/shop.faq.json".into() }
fn default_catalog() -> String { "~/.faqroute/catalog.json".into() }

impl Default for FaqRouteConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            knowledge_base: default_knowledge_base(),
            catalog: default_catalog(),
            rules: IntentRules::default(),
        }
    }
}

impl FaqRouteConfig {
    /// Load config from the default path (~/.faqroute/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqRouteError::Config(format!("Failed to read config: {e}")))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| FaqRouteError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| FaqRouteError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject thresholds that would make every comparison meaningless.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }

    /// Knowledge base path with `~` expanded.
    pub fn knowledge_base_path(&self) -> PathBuf {
        expand_path(&self.knowledge_base)
    }

    /// Catalog path with `~` expanded, or `None` when no catalog is configured.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if self.catalog.trim().is_empty() {
            None
        } else {
            Some(expand_path(&self.catalog))
        }
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the faqroute home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".faqroute")
    }
}

/// A threshold must be a finite, non-negative score.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(FaqRouteError::Config(format!(
            "threshold must be a finite non-negative number, got {threshold}"
        )));
    }
    Ok(())
}

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}
