//! Keyword-based intent classifier.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::analysis::Analyzer;
use crate::classifier::types::{ClassificationResult, IntentCategory};

use super::classifier::IntentClassifier;

const TOKEN_WEIGHT: f64 = 1.0;
const PHRASE_WEIGHT: f64 = 1.5;

/// Cue words and phrases that signal one intent category.
///
/// Token cues are compared against analyzed tokens, so they must be lowercase
/// and must not be stop words. Phrase cues are matched against the lowercased
/// raw query.
#[derive(Debug, Clone)]
pub struct IntentCues {
    pub category: IntentCategory,
    pub tokens: HashSet<String>,
    pub phrases: Vec<String>,
}

impl IntentCues {
    pub fn new(category: IntentCategory, tokens: &[&str], phrases: &[&str]) -> Self {
        IntentCues {
            category,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// The built-in cue table for operational questions.
    pub fn defaults() -> Vec<IntentCues> {
        use IntentCategory::*;

        vec![
            IntentCues::new(
                State,
                &[
                    "healthy", "health", "status", "now", "current", "currently", "breached",
                    "breach", "slo", "slos", "state", "active", "open", "running", "meeting",
                ],
                &["how is my", "is it up"],
            ),
            IntentCues::new(
                Trend,
                &[
                    "trend", "trending", "drifting", "drift", "vs", "versus", "compared", "last",
                    "month", "week", "today", "yesterday", "1h", "24h", "increasing",
                    "decreasing", "growing",
                ],
                &["over time", "last hour", "what's the trend"],
            ),
            IntentCues::new(
                Pattern,
                &[
                    "seen", "before", "similar", "recurring", "pattern", "again", "repeat",
                    "usual",
                ],
                &["seen this before", "happened before"],
            ),
            IntentCues::new(
                Cause,
                &[
                    "why", "cause", "caused", "causing", "root", "reason", "failing", "unhealthy",
                    "broken",
                ],
                &["root cause", "why is", "why are"],
            ),
            IntentCues::new(
                Impact,
                &[
                    "affected", "affect", "impact", "impacted", "breaks", "blast", "customers",
                    "downstream", "dependencies", "depends",
                ],
                &["what else", "blast radius"],
            ),
            IntentCues::new(
                Action,
                &[
                    "fix", "rollback", "remediate", "restart", "mitigate", "should", "resolve",
                    "revert",
                ],
                &["how do i", "what should"],
            ),
            IntentCues::new(
                Predict,
                &["might", "next", "risky", "risk", "predict", "likely", "forecast"],
                &["going to", "what might"],
            ),
            IntentCues::new(
                Optimize,
                &[
                    "slowing", "slow", "costly", "cost", "expensive", "optimize", "faster",
                    "efficient", "latency", "bottleneck",
                ],
                &["slowing us down"],
            ),
            IntentCues::new(
                Evidence,
                &["evidence", "rca", "show", "proof", "logs", "timeline", "happened", "step"],
                &["step-by-step", "what happened"],
            ),
        ]
    }
}

/// Keyword-based intent classifier.
///
/// Scores every category by the cues found in the query. Categories scoring
/// at least `primary_ratio` of the best score become primary intents; the
/// rest of the matched categories are reported as secondary.
pub struct KeywordBasedIntentClassifier {
    cues: Vec<IntentCues>,
    primary_ratio: f64,
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for KeywordBasedIntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordBasedIntentClassifier")
            .field("categories", &self.cues.len())
            .field("primary_ratio", &self.primary_ratio)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl KeywordBasedIntentClassifier {
    /// Default share of the top score a category needs to count as primary.
    pub const DEFAULT_PRIMARY_RATIO: f64 = 0.75;

    /// Create a new keyword-based intent classifier.
    pub fn new(cues: Vec<IntentCues>, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        if cues.is_empty() {
            anyhow::bail!("Cue table cannot be empty");
        }
        if let Some(empty) = cues
            .iter()
            .find(|c| c.tokens.is_empty() && c.phrases.is_empty())
        {
            anyhow::bail!("Category {} has no cues", empty.category);
        }

        Ok(Self {
            cues,
            primary_ratio: Self::DEFAULT_PRIMARY_RATIO,
            analyzer,
        })
    }

    /// Create a classifier with the built-in cue table.
    pub fn with_default_cues(analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        Self::new(IntentCues::defaults(), analyzer)
    }

    /// Set the primary ratio, clamped to `(0, 1]`.
    pub fn primary_ratio(mut self, ratio: f64) -> Self {
        self.primary_ratio = ratio.clamp(f64::EPSILON, 1.0);
        self
    }

    fn score(&self, query: &str) -> Result<Vec<(IntentCategory, f64, Vec<String>)>> {
        let terms: HashSet<String> = self
            .analyzer
            .analyze(query)?
            .map(|token| token.text)
            .collect();
        let lowered = query.to_lowercase();

        let mut scores = Vec::new();
        for cues in &self.cues {
            let mut matched: Vec<String> = cues
                .tokens
                .iter()
                .filter(|cue| terms.contains(*cue))
                .cloned()
                .collect();
            matched.sort();
            let token_hits = matched.len();

            for phrase in &cues.phrases {
                if lowered.contains(phrase.as_str()) {
                    matched.push(phrase.clone());
                }
            }
            let phrase_hits = matched.len() - token_hits;

            let score = token_hits as f64 * TOKEN_WEIGHT + phrase_hits as f64 * PHRASE_WEIGHT;
            if score > 0.0 {
                scores.push((cues.category, score, matched));
            }
        }

        // Stable sort keeps cue table order for equal scores.
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(scores)
    }
}

impl IntentClassifier for KeywordBasedIntentClassifier {
    fn classify(&self, query: &str) -> Result<ClassificationResult> {
        if query.trim().is_empty() {
            anyhow::bail!("Query must not be empty");
        }

        let scores = self.score(query)?;
        let Some(top) = scores.first().map(|(_, score, _)| *score) else {
            return Ok(ClassificationResult::with_error("no intent cues matched")
                .with_field("classifier", self.name()));
        };

        let threshold = top * self.primary_ratio;
        let (primary, secondary): (Vec<_>, Vec<_>) =
            scores.iter().partition(|(_, score, _)| *score >= threshold);

        let matched_cues: Vec<Value> = scores
            .iter()
            .flat_map(|(_, _, cues)| cues.iter().cloned().map(Value::from))
            .collect();
        let secondary: Vec<Value> = secondary
            .iter()
            .map(|(category, _, _)| Value::from(category.label()))
            .collect();

        Ok(ClassificationResult::with_primary_intents(
            primary.iter().map(|(category, _, _)| category.label()),
        )
        .with_field("secondary_intents", secondary)
        .with_field("confidence", top / (top + 1.0))
        .with_field("matched_cues", matched_cues)
        .with_field("classifier", self.name()))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
