//! TF-IDF vectorizer for query feature extraction.

use std::collections::HashSet;
use std::sync::Arc;

use ahash::AHashMap;
use anyhow::Result;

use crate::analysis::Analyzer;

/// TF-IDF vectorizer for query feature extraction.
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each word.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.n_documents = documents.len();
        let mut vocabulary = AHashMap::new();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = self.tokenize(doc)?.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }

        let mut idf = vec![0.0; vocabulary.len()];
        for (word, &idx) in &vocabulary {
            let df = document_frequency.get(word).copied().unwrap_or(0);
            // IDF = log((N + 1) / (df + 1)) + 1
            idf[idx] = ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Tokens outside the fitted vocabulary are ignored, so a query made only
    /// of unseen words yields the zero vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = self.tokenize(document)?;
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (count, idf) in tf.iter_mut().zip(&self.idf) {
            *count *= idf;
        }

        Ok(tf)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StandardAnalyzer;

    #[test]
    fn test_tfidf_vectorizer() {
        let documents = vec![
            "is checkout healthy".to_string(),
            "why is checkout failing".to_string(),
            "show evidence for the incident".to_string(),
        ];

        let mut vectorizer = TfIdfVectorizer::new(Arc::new(StandardAnalyzer::new()));
        vectorizer.fit(&documents).unwrap();
        assert!(vectorizer.vocabulary_size() > 0);

        let features = vectorizer.transform("why is search failing").unwrap();
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!(features.iter().any(|&w| w > 0.0));
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let documents = vec![
            "checkout healthy".to_string(),
            "checkout failing".to_string(),
            "checkout slow".to_string(),
        ];

        let mut vectorizer = TfIdfVectorizer::new(Arc::new(StandardAnalyzer::new()));
        vectorizer.fit(&documents).unwrap();

        let features = vectorizer.transform("checkout failing").unwrap();
        let mut weights: Vec<f64> = features.into_iter().filter(|&w| w > 0.0).collect();
        weights.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(weights.len(), 2);
        assert!(weights[0] < weights[1]);
    }

    #[test]
    fn test_unseen_query_is_zero_vector() {
        let mut vectorizer = TfIdfVectorizer::new(Arc::new(StandardAnalyzer::new()));
        vectorizer.fit(&["checkout healthy".to_string()]).unwrap();

        let features = vectorizer.transform("banana").unwrap();
        assert!(features.iter().all(|&w| w == 0.0));
    }
}
