//! Machine learning-based intent classifier using TF-IDF.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::analysis::Analyzer;

use super::classifier::IntentClassifier;
use super::tfidf::TfIdfVectorizer;
use super::types::{ClassificationResult, IntentSample};

/// Machine learning-based intent classifier.
///
/// Every intent label keeps the TF-IDF vectors of its training samples. A
/// query scores the average cosine similarity against each label; labels
/// within `primary_ratio` of the best score and above `min_similarity` become
/// primary intents.
#[derive(Debug)]
pub struct MLBasedIntentClassifier {
    /// TF-IDF vectorizer.
    vectorizer: TfIdfVectorizer,
    /// Training data: intent -> feature vectors, in first-seen label order.
    intent_prototypes: Vec<(String, Vec<Vec<f64>>)>,
    min_similarity: f64,
    primary_ratio: f64,
}

impl MLBasedIntentClassifier {
    /// Default minimum average similarity for any intent to be reported.
    pub const DEFAULT_MIN_SIMILARITY: f64 = 0.05;
    /// Default share of the top score a label needs to count as primary.
    pub const DEFAULT_PRIMARY_RATIO: f64 = 0.8;

    /// Create a new ML intent classifier and train it from samples with a specified analyzer.
    pub fn new(samples: Vec<IntentSample>, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        if samples.is_empty() {
            anyhow::bail!("Training samples cannot be empty");
        }
        if let Some(bad) = samples.iter().find(|s| s.intent.trim().is_empty()) {
            anyhow::bail!("Training sample {:?} has an empty intent label", bad.query);
        }

        let documents: Vec<String> = samples.iter().map(|s| s.query.clone()).collect();

        let mut vectorizer = TfIdfVectorizer::new(analyzer);
        vectorizer.fit(&documents)?;
        if vectorizer.vocabulary_size() == 0 {
            anyhow::bail!("Training samples produced an empty vocabulary");
        }

        let mut intent_prototypes: Vec<(String, Vec<Vec<f64>>)> = Vec::new();
        for sample in samples {
            let features = vectorizer.transform(&sample.query)?;
            match intent_prototypes
                .iter_mut()
                .find(|(intent, _)| *intent == sample.intent)
            {
                Some((_, prototypes)) => prototypes.push(features),
                None => intent_prototypes.push((sample.intent, vec![features])),
            }
        }

        Ok(Self {
            vectorizer,
            intent_prototypes,
            min_similarity: Self::DEFAULT_MIN_SIMILARITY,
            primary_ratio: Self::DEFAULT_PRIMARY_RATIO,
        })
    }

    /// Set the minimum average similarity.
    pub fn min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity.max(0.0);
        self
    }

    /// Set the primary ratio, clamped to `(0, 1]`.
    pub fn primary_ratio(mut self, ratio: f64) -> Self {
        self.primary_ratio = ratio.clamp(f64::EPSILON, 1.0);
        self
    }

    /// Number of distinct intent labels learned.
    pub fn intent_count(&self) -> usize {
        self.intent_prototypes.len()
    }

    /// Average similarity of the query to each intent, best first.
    fn score(&self, query: &str) -> Result<Vec<(&str, f64)>> {
        let query_features = self.vectorizer.transform(query)?;

        let mut scores: Vec<(&str, f64)> = self
            .intent_prototypes
            .iter()
            .map(|(intent, prototypes)| {
                let total: f64 = prototypes
                    .iter()
                    .map(|prototype| Self::cosine_similarity(&query_features, prototype))
                    .sum();
                (intent.as_str(), total / prototypes.len() as f64)
            })
            .collect();

        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(scores)
    }

    /// Calculate cosine similarity between two vectors.
    fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let magnitude_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let magnitude_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            0.0
        } else {
            dot_product / (magnitude_a * magnitude_b)
        }
    }
}

impl IntentClassifier for MLBasedIntentClassifier {
    fn classify(&self, query: &str) -> Result<ClassificationResult> {
        if query.trim().is_empty() {
            anyhow::bail!("Query must not be empty");
        }

        let scores = self.score(query)?;
        let top = scores.first().map(|(_, score)| *score).unwrap_or(0.0);
        if top < self.min_similarity {
            return Ok(ClassificationResult::with_error(format!(
                "no intent scored above similarity floor {:.2}",
                self.min_similarity
            ))
            .with_field("classifier", self.name()));
        }

        let threshold = (top * self.primary_ratio).max(self.min_similarity);
        let primary = scores
            .iter()
            .take_while(|(_, score)| *score >= threshold)
            .map(|(intent, _)| *intent);

        let similarities: Map<String, Value> = scores
            .iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(intent, score)| (intent.to_string(), Value::from(*score)))
            .collect();

        Ok(ClassificationResult::with_primary_intents(primary)
            .with_field("confidence", top)
            .with_field("similarities", similarities)
            .with_field("classifier", self.name()))
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
