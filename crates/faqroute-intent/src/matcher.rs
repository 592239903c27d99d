//! Keyword matcher: hit-density scoring of every topic.

use faqroute_knowledge::KnowledgeBase;

/// Denominator floor: a topic with few keywords cannot reach 1.0 on one hit.
pub const MIN_DENOMINATOR: usize = 3;
/// Denominator cap: broad topics are not penalized for their breadth.
pub const MAX_DENOMINATOR: usize = 10;

/// Best-scoring topic of one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub topic_id: String,
    pub score: f64,
    /// Number of distinct keywords found in the text.
    pub hits: usize,
}

/// `hits / clamp(keyword_count, 3, 10)`; zero keywords count as one.
pub fn hit_density(hits: usize, keyword_count: usize) -> f64 {
    let denominator = keyword_count.max(1).clamp(MIN_DENOMINATOR, MAX_DENOMINATOR);
    hits as f64 / denominator as f64
}

/// Score normalized `text` against every topic, in knowledge base order.
///
/// Keywords match as substrings, not tokens. A later topic replaces the
/// current best only with a strictly greater score, so the earlier topic
/// wins ties. Returns `None` when no topic has a single hit.
pub fn match_topic(text: &str, kb: &KnowledgeBase) -> Option<MatchResult> {
    let mut best: Option<MatchResult> = None;

    for topic in kb.topics() {
        let hits = topic
            .keywords()
            .iter()
            .filter(|kw| text.contains(kw.as_str()))
            .count();
        if hits == 0 {
            continue;
        }

        let score = hit_density(hits, topic.keywords().len());
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(MatchResult {
                topic_id: topic.id().to_string(),
                score,
                hits,
            });
        }
    }

    best
}
