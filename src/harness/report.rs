//! Per-query records and the report a completed run produces.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::classifier::ClassificationResult;
use crate::harness::summary::RunSummary;

/// Outcome of one classify attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The classifier returned a result. It may still carry an in-band `error`.
    Success(ClassificationResult),
    /// The classifier raised an error.
    Failure(String),
}

impl QueryOutcome {
    /// The result, if the classifier returned one.
    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            QueryOutcome::Success(result) => Some(result),
            QueryOutcome::Failure(_) => None,
        }
    }

    /// Returned a result without an `error`.
    pub fn is_success(&self) -> bool {
        self.result().is_some_and(ClassificationResult::is_success)
    }
}

/// One attempt, as recorded by the runner.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRecord {
    /// 1-based position in the suite.
    pub index: usize,
    pub query: String,
    pub outcome: QueryOutcome,
    /// Wall-clock time spent in the classify call.
    pub duration_ms: u64,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub classifier: String,
    pub records: Vec<QueryRecord>,
    pub summary: RunSummary,
    pub duration_ms: u64,
}

impl RunReport {
    /// Results the classifier returned, in suite order.
    ///
    /// Raised failures are not part of this list.
    pub fn results(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.records.iter().filter_map(|record| record.outcome.result())
    }

    /// Records whose classify call raised an error.
    pub fn failures(&self) -> impl Iterator<Item = &QueryRecord> {
        self.records
            .iter()
            .filter(|record| matches!(record.outcome, QueryOutcome::Failure(_)))
    }
}
