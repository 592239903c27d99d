//! Intent classifier: gate → matcher → threshold.

use faqroute_core::config::{validate_threshold, FaqRouteConfig};
use faqroute_core::error::Result;
use faqroute_core::text::normalize;
use faqroute_core::DEFAULT_FAQ_THRESHOLD;
use faqroute_knowledge::{CategoryIndex, KnowledgeBase};
use serde::Serialize;
use std::sync::{Arc, LazyLock};

use crate::gate::ProductIntentGate;
use crate::matcher::match_topic;

static DEFAULT_GATE: LazyLock<ProductIntentGate> = LazyLock::new(ProductIntentGate::default);

/// Routing decision for one utterance.
///
/// `NoMatch` covers both "gated as product intent" and "best score below
/// threshold". Callers hand either case to product search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    FaqMatch { topic_id: String, score: f64 },
    NoMatch,
}

impl ClassificationOutcome {
    pub fn is_faq_match(&self) -> bool {
        matches!(self, Self::FaqMatch { .. })
    }

    pub fn topic_id(&self) -> Option<&str> {
        match self {
            Self::FaqMatch { topic_id, .. } => Some(topic_id),
            Self::NoMatch => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::FaqMatch { score, .. } => Some(*score),
            Self::NoMatch => None,
        }
    }

    /// The stored answer to render for a match.
    pub fn answer<'a>(&self, kb: &'a KnowledgeBase) -> Option<&'a str> {
        self.topic_id().and_then(|id| kb.answer(id))
    }
}

impl std::fmt::Display for ClassificationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FaqMatch { topic_id, score } => write!(f, "faq_match({topic_id}, {score:.3})"),
            Self::NoMatch => write!(f, "no_match"),
        }
    }
}

/// Classify `raw` text with the built-in German rule lists.
pub fn classify(
    raw: &str,
    kb: &KnowledgeBase,
    categories: &CategoryIndex,
    threshold: f64,
) -> ClassificationOutcome {
    classify_with(&DEFAULT_GATE, raw, kb, categories, threshold)
}

/// Classify `raw` text through a specific gate.
pub fn classify_with(
    gate: &ProductIntentGate,
    raw: &str,
    kb: &KnowledgeBase,
    categories: &CategoryIndex,
    threshold: f64,
) -> ClassificationOutcome {
    let text = normalize(raw);

    if let Some(trigger) = gate.vetoes(&text, categories) {
        tracing::debug!("🛍️ Product intent ({trigger}), skipping FAQ matching: {text:?}");
        return ClassificationOutcome::NoMatch;
    }

    match match_topic(&text, kb) {
        Some(m) if m.score >= threshold => {
            tracing::debug!(
                "📖 FAQ match: {} (score {:.3}, {} hits)",
                m.topic_id,
                m.score,
                m.hits
            );
            ClassificationOutcome::FaqMatch {
                topic_id: m.topic_id,
                score: m.score,
            }
        }
        Some(m) => {
            tracing::debug!(
                "Best FAQ topic {} below threshold ({:.3} < {:.3})",
                m.topic_id,
                m.score,
                threshold
            );
            ClassificationOutcome::NoMatch
        }
        None => ClassificationOutcome::NoMatch,
    }
}

/// Classifier bound to a shared knowledge base and category index.
///
/// Cheap to clone; every clone reads the same immutable data, so it can be
/// handed to any number of threads.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    kb: Arc<KnowledgeBase>,
    categories: Arc<CategoryIndex>,
    gate: Arc<ProductIntentGate>,
    threshold: f64,
}

impl IntentClassifier {
    /// Classifier with default rules and `DEFAULT_FAQ_THRESHOLD`.
    pub fn new(kb: Arc<KnowledgeBase>, categories: Arc<CategoryIndex>) -> Self {
        Self {
            kb,
            categories,
            gate: Arc::new(ProductIntentGate::default()),
            threshold: DEFAULT_FAQ_THRESHOLD,
        }
    }

    /// Classifier using the threshold and rule lists from configuration.
    pub fn from_config(
        config: &FaqRouteConfig,
        kb: Arc<KnowledgeBase>,
        categories: Arc<CategoryIndex>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kb,
            categories,
            gate: Arc::new(ProductIntentGate::new(&config.rules)),
            threshold: config.threshold,
        })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_gate(mut self, gate: ProductIntentGate) -> Self {
        self.gate = Arc::new(gate);
        self
    }

    pub fn classify(&self, raw: &str) -> ClassificationOutcome {
        classify_with(&self.gate, raw, &self.kb, &self.categories, self.threshold)
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn gate(&self) -> &ProductIntentGate {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqroute_core::rules::IntentRules;
    use faqroute_knowledge::Topic;

    fn shop_kb() -> KnowledgeBase {
        KnowledgeBase::new(vec![
            Topic::new("shipping_time", &["lieferzeit", "versanddauer", "wann kommt"])
                .with_answer("2-4 Werktage."),
            Topic::new("returns", &["retoure", "rücksendung", "widerruf", "zurückschicken", "rückgabe", "umtausch"])
                .with_answer("14 Tage Widerruf."),
            Topic::new("support", &["support", "kontakt", "erreichen", "email", "telefon", "hilfe", "kundenservice"]),
        ])
        .unwrap()
    }

    fn kosmetik() -> CategoryIndex {
        CategoryIndex::from_categories(["kosmetik"])
    }

    #[test]
    fn test_basic_faq_hit() {
        let outcome = classify("Wie lange ist die Lieferzeit?", &shop_kb(), &CategoryIndex::new(), 0.10);
        assert_eq!(outcome.topic_id(), Some("shipping_time"));
        assert!((outcome.score().unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_gate_suppresses_overlapping_keywords() {
        let kb = KnowledgeBase::new(vec![Topic::new("search_help", &["suche", "finden"])]).unwrap();
        assert!(classify("ich suche was", &kb, &kosmetik(), 0.10).is_faq_match());
        assert_eq!(
            classify("Ich suche etwas unter 30€", &kb, &kosmetik(), 0.10),
            ClassificationOutcome::NoMatch
        );
    }

    #[test]
    fn test_strong_signal_overrides_gate() {
        let outcome = classify(
            "Ich brauche Hilfe mit meiner Retoure, Bestellung unter 30€",
            &shop_kb(),
            &kosmetik(),
            0.10,
        );
        assert_eq!(outcome.topic_id(), Some("returns"));
        assert!(outcome.score().unwrap() >= 0.10);
    }

    #[test]
    fn test_below_threshold() {
        let outcome = classify("Lieferzeit?", &shop_kb(), &CategoryIndex::new(), 0.5);
        assert_eq!(outcome, ClassificationOutcome::NoMatch);
    }

    #[test]
    fn test_score_boundary_accepted() {
        let keywords: Vec<String> = (0..12).map(|i| format!("kw{i:02}")).collect();
        let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
        let kb = KnowledgeBase::new(vec![Topic::new("wide", &refs)]).unwrap();

        let outcome = classify("nur kw07 hier", &kb, &CategoryIndex::new(), 0.10);
        assert_eq!(
            outcome,
            ClassificationOutcome::FaqMatch {
                topic_id: "wide".into(),
                score: 0.1
            }
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(classify("", &shop_kb(), &kosmetik(), 0.10), ClassificationOutcome::NoMatch);
        assert_eq!(
            classify("lieferzeit", &KnowledgeBase::empty(), &kosmetik(), 0.10),
            ClassificationOutcome::NoMatch
        );
    }

    #[test]
    fn test_answer_lookup() {
        let kb = shop_kb();
        let outcome = classify("Was ist die Versanddauer", &kb, &CategoryIndex::new(), 0.10);
        assert_eq!(outcome.answer(&kb), Some("2-4 Werktage."));
        assert_eq!(ClassificationOutcome::NoMatch.answer(&kb), None);
    }

    #[test]
    fn test_outcome_display_and_json() {
        let outcome = ClassificationOutcome::FaqMatch {
            topic_id: "returns".into(),
            score: 1.0 / 6.0,
        };
        assert_eq!(outcome.to_string(), "faq_match(returns, 0.167)");
        assert_eq!(ClassificationOutcome::NoMatch.to_string(), "no_match");

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "faq_match");
        assert_eq!(json["topic_id"], "returns");
        let json = serde_json::to_value(ClassificationOutcome::NoMatch).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "no_match"}));
    }

    #[test]
    fn test_classifier_shares_data() {
        let classifier = IntentClassifier::new(Arc::new(shop_kb()), Arc::new(kosmetik()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = classifier.clone();
                std::thread::spawn(move || c.classify("Wie lange ist die Lieferzeit?"))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().topic_id(), Some("shipping_time"));
        }
    }

    #[test]
    fn test_classifier_threshold_and_rules() {
        let classifier = IntentClassifier::new(Arc::new(shop_kb()), Arc::new(kosmetik()));
        assert!((classifier.threshold() - DEFAULT_FAQ_THRESHOLD).abs() < f64::EPSILON);
        assert!(classifier.clone().with_threshold(-1.0).is_err());

        let strict = classifier.clone().with_threshold(0.5).unwrap();
        assert!(!strict.classify("Lieferzeit?").is_faq_match());

        let no_strong = IntentRules {
            strong_faq_signals: Vec::new(),
            ..IntentRules::default()
        };
        let gated = classifier.with_gate(ProductIntentGate::new(&no_strong));
        assert!(!gated.classify("Lieferzeit für Bestellungen unter 30€").is_faq_match());
    }

    #[test]
    fn test_from_config() {
        let config = FaqRouteConfig::from_toml("threshold = 0.3").unwrap();
        let classifier =
            IntentClassifier::from_config(&config, Arc::new(shop_kb()), Arc::new(CategoryIndex::new())).unwrap();
        assert!((classifier.threshold() - 0.3).abs() < f64::EPSILON);
        assert!(classifier.classify("Lieferzeit?").is_faq_match());
        assert_eq!(classifier.knowledge_base().len(), 3);
        assert!(classifier.categories().is_empty());
        assert_eq!(classifier.gate().rules(), &config.rules.prepared());
    }
}
