//! Intent classifier trait definition.

use anyhow::Result;

use crate::classifier::types::ClassificationResult;

/// Intent classifier trait.
///
/// Construction is initialization: a value of this trait is ready to
/// classify. Failures come back through two channels, a raised error from
/// [`classify`](Self::classify) or a result whose `error` field is set.
pub trait IntentClassifier: Send + Sync {
    /// Classify a single query.
    ///
    /// # Arguments
    /// * `query` - The query string to classify
    ///
    /// # Returns
    /// The `ClassificationResult` for the query
    fn classify(&self, query: &str) -> Result<ClassificationResult>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

impl<C: IntentClassifier + ?Sized> IntentClassifier for Box<C> {
    fn classify(&self, query: &str) -> Result<ClassificationResult> {
        (**self).classify(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
