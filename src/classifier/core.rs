//! Training data for the TF-IDF backend.

use std::path::Path;

use anyhow::{Context, Result};

use crate::classifier::types::{IntentCategory, IntentSample};

/// Load training data from a JSON file holding an array of samples.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<IntentSample>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read training data {}", path.display()))?;
    let samples: Vec<IntentSample> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse training data {}", path.display()))?;
    Ok(samples)
}

/// Seed training set covering every [`IntentCategory`].
pub fn default_training_samples() -> Vec<IntentSample> {
    use IntentCategory::*;

    let seeds: &[(&str, IntentCategory)] = &[
        ("is the checkout service healthy right now", State),
        ("current status of my application", State),
        ("which slos are breached or at risk", State),
        ("which alerts are active and incidents open", State),
        ("what is drifting over the last hour", Trend),
        ("compare error rate today vs last week", Trend),
        ("is latency trending up this month", Trend),
        ("have we seen this incident before", Pattern),
        ("is this a recurring failure pattern", Pattern),
        ("similar outages in the past", Pattern),
        ("why is the payment service failing", Cause),
        ("root cause of unhealthy services", Cause),
        ("what caused the error spike", Cause),
        ("what else breaks if the database fails", Impact),
        ("which customers are affected by the outage", Impact),
        ("blast radius of the failing dependency", Impact),
        ("how do i fix this incident now", Action),
        ("should i rollback the latest change", Action),
        ("restart or scale the failing pods", Action),
        ("what might fail next", Predict),
        ("is this deployment risky", Predict),
        ("likely capacity problems next week", Predict),
        ("what is slowing us down", Optimize),
        ("which queries are costly", Optimize),
        ("reduce cloud cost and latency", Optimize),
        ("show evidence for the rca", Evidence),
        ("what happened step by step", Evidence),
        ("timeline and logs supporting the diagnosis", Evidence),
    ];

    seeds
        .iter()
        .map(|(query, category)| IntentSample::new(*query, category.label()))
        .collect()
}
