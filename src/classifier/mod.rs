//! Intent classifiers driven by the harness.
//!
//! The harness only depends on the [`IntentClassifier`] trait. Two backends
//! ship with the crate so a run needs no external service:
//! - Keyword-based classification: cue words and phrases per category
//! - ML-based classification: TF-IDF vectorization with cosine similarity
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: Common interface for all classifiers
//! - `KeywordBasedIntentClassifier`: Cue matching implementation
//! - `MLBasedIntentClassifier`: ML-based implementation using TF-IDF
//! - `TfIdfVectorizer`: Feature extraction using TF-IDF
//! - `ClassificationResult`: What a classify call returns
//!
//! # Example
//!
//! ```rust
//! use intent_harness::analysis::StandardAnalyzer;
//! use intent_harness::classifier::{IntentClassifier, KeywordBasedIntentClassifier};
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let classifier = KeywordBasedIntentClassifier::with_default_cues(Arc::new(StandardAnalyzer::new()))?;
//!
//! let result = classifier.classify("Is payment-api healthy?")?;
//! assert_eq!(result.primary_intents(), ["STATE".to_string()]);
//! # Ok(())
//! # }
//! ```

mod classifier;
mod core;
mod keyword_classifier;
mod ml_classifier;
mod tfidf;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use self::core::{default_training_samples, load_training_data};
pub use keyword_classifier::{IntentCues, KeywordBasedIntentClassifier};
pub use ml_classifier::MLBasedIntentClassifier;
pub use tfidf::TfIdfVectorizer;
pub use types::{ClassificationResult, IntentCategory, IntentSample};
