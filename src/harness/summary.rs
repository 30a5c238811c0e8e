//! Aggregate statistics over a run.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::harness::report::QueryOutcome;

/// Number of labels listed under "most common intents" by default.
pub const DEFAULT_TOP_INTENTS: usize = 5;

/// Frequency counter that remembers first-encountered order.
///
/// [`most_common`](Self::most_common) sorts by descending count and keeps
/// first-encountered order among equal counts.
#[derive(Debug, Clone, Default)]
pub struct IntentTally {
    counts: Vec<(String, usize)>,
    index: AHashMap<String, usize>,
    total: usize,
}

impl IntentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn record(&mut self, label: &str) {
        self.total += 1;
        match self.index.get(label) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.counts.len());
                self.counts.push((label.to_string(), 1));
            }
        }
    }

    /// Total number of recorded labels, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct labels.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    /// The `n` most frequent labels.
    pub fn most_common(&self, n: usize) -> Vec<IntentCount> {
        let mut ranked: Vec<&(String, usize)> = self.counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(intent, count)| IntentCount {
                intent: intent.clone(),
                count: *count,
            })
            .collect()
    }
}

impl<'a> Extend<&'a str> for IntentTally {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for label in iter {
            self.record(label);
        }
    }
}

/// One row of the "most common intents" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCount {
    pub intent: String,
    pub count: usize,
}

/// Summary statistics printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_queries: usize,
    /// Results without an `error`.
    pub successful: usize,
    /// Raised errors plus results carrying an `error`.
    pub failed: usize,
    /// Length of the flattened `primary_intents` of successful results.
    pub total_primary_intents: usize,
    /// Distinct labels in that flattened sequence.
    pub unique_intents: usize,
    pub most_common: Vec<IntentCount>,
}

impl RunSummary {
    /// Summarize the outcomes of a run, listing up to `top` intents.
    pub fn from_outcomes<'a, I>(outcomes: I, top: usize) -> Self
    where
        I: IntoIterator<Item = &'a QueryOutcome>,
    {
        let mut tally = IntentTally::new();
        let mut total_queries = 0;
        let mut successful = 0;

        for outcome in outcomes {
            total_queries += 1;
            if let QueryOutcome::Success(result) = outcome
                && result.is_success()
            {
                successful += 1;
                tally.extend(result.primary_intents().iter().map(String::as_str));
            }
        }

        RunSummary {
            total_queries,
            successful,
            failed: total_queries - successful,
            total_primary_intents: tally.total(),
            unique_intents: tally.unique(),
            most_common: tally.most_common(top),
        }
    }

    /// Whether any successful result reported a primary intent.
    pub fn has_intents(&self) -> bool {
        self.total_primary_intents > 0
    }
}
