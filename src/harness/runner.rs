//! The sequential test runner.
//!
//! A run goes `NotStarted → Initializing → Failed | Running → Completed`.
//! Initialization failure ends the run before any query is attempted. Once
//! running, every query is attempted exactly once, in order; a failing query
//! is recorded and the run moves on.

use std::time::Instant;

use chrono::Utc;
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::classifier::{ClassificationResult, IntentClassifier};
use crate::error::{HarnessError, Result};
use crate::harness::pacer::Pacer;
use crate::harness::report::{QueryOutcome, QueryRecord, RunReport};
use crate::harness::summary::{DEFAULT_TOP_INTENTS, RunSummary};

/// Lifecycle of a [`TestRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Initializing,
    /// Terminal: the classifier could not be constructed.
    Failed,
    Running,
    Completed,
}

/// Receives progress from the runner and renders it.
///
/// Every hook except [`print_result`](Self::print_result) defaults to doing
/// nothing.
pub trait RunPresenter {
    fn initializing(&mut self) -> Result<()> {
        Ok(())
    }

    fn initialized(&mut self, _classifier: &str) -> Result<()> {
        Ok(())
    }

    fn initialization_failed(&mut self, _error: &HarnessError) -> Result<()> {
        Ok(())
    }

    fn run_started(&mut self, _total: usize) -> Result<()> {
        Ok(())
    }

    /// Called before the classify call for query `index` (1-based).
    fn attempt(&mut self, _index: usize, _total: usize, _query: &str) -> Result<()> {
        Ok(())
    }

    /// Called once for every result the classifier returned.
    ///
    /// An error here is reported through [`failure`](Self::failure) and the
    /// run continues; the result still counts toward the summary.
    fn print_result(&mut self, result: &ClassificationResult) -> Result<()>;

    /// Called once for every classify call that raised an error.
    fn failure(&mut self, _index: usize, _reason: &str) -> Result<()> {
        Ok(())
    }

    fn completed(&mut self, _report: &RunReport) -> Result<()> {
        Ok(())
    }
}

/// Drives a fixed query suite through a classifier.
#[derive(Debug)]
pub struct TestRunner<P: Pacer> {
    queries: Vec<String>,
    pacer: P,
    top_intents: usize,
    state: RunState,
}

impl<P: Pacer> TestRunner<P> {
    pub fn new(queries: Vec<String>, pacer: P) -> Self {
        TestRunner {
            queries,
            pacer,
            top_intents: DEFAULT_TOP_INTENTS,
            state: RunState::NotStarted,
        }
    }

    /// Number of labels in the "most common intents" list.
    pub fn top_intents(mut self, top_intents: usize) -> Self {
        self.top_intents = top_intents;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Initialize a classifier with `init` and run the suite through it.
    ///
    /// Returns [`HarnessError::Initialization`] if `init` fails, after
    /// reporting it to the presenter; no query is attempted in that case.
    /// Per-query failures never fail the run.
    pub fn run<C, F, R>(&mut self, init: F, presenter: &mut R) -> Result<RunReport>
    where
        C: IntentClassifier,
        F: FnOnce() -> anyhow::Result<C>,
        R: RunPresenter + ?Sized,
    {
        if self.state != RunState::NotStarted {
            return Err(HarnessError::invalid_operation(format!(
                "runner cannot start from state {:?}",
                self.state
            )));
        }

        self.state = RunState::Initializing;
        presenter.initializing()?;

        let classifier = match init() {
            Ok(classifier) => classifier,
            Err(e) => {
                self.state = RunState::Failed;
                error!("Failed to initialize classifier: {e:#}");
                let error = HarnessError::initialization(format!("{e:#}"));
                presenter.initialization_failed(&error)?;
                return Err(error);
            }
        };
        info!("Initialized {} classifier", classifier.name());
        presenter.initialized(classifier.name())?;

        self.state = RunState::Running;
        let started_at = Utc::now();
        let run_start = Instant::now();
        let total = self.queries.len();
        presenter.run_started(total)?;

        let mut records = Vec::with_capacity(total);
        for (i, query) in self.queries.iter().enumerate() {
            let index = i + 1;
            presenter.attempt(index, total, query)?;
            debug!("[{index}/{total}] classifying {query:?}");

            let attempt_start = Instant::now();
            let outcome = match classifier.classify(query) {
                Ok(result) => QueryOutcome::Success(result),
                Err(e) => QueryOutcome::Failure(format!("{e:#}")),
            };
            let duration_ms = attempt_start.elapsed().as_millis() as u64;

            match &outcome {
                QueryOutcome::Success(result) => {
                    if let Some(reason) = &result.error {
                        warn!("[{index}/{total}] classifier reported an error: {reason}");
                    }
                    if let Err(e) = presenter.print_result(result) {
                        warn!("[{index}/{total}] could not present result: {e}");
                        if let Err(e) = presenter.failure(index, &e.to_string()) {
                            warn!("[{index}/{total}] could not report failure: {e}");
                        }
                    }
                }
                QueryOutcome::Failure(reason) => {
                    warn!("[{index}/{total}] classification failed: {reason}");
                    presenter.failure(index, reason)?;
                }
            }

            records.push(QueryRecord {
                index,
                query: query.clone(),
                outcome,
                duration_ms,
            });

            self.pacer.pause();
        }

        let summary = RunSummary::from_outcomes(
            records.iter().map(|record| &record.outcome),
            self.top_intents,
        );
        info!(
            "Run finished: {} successful, {} failed, {} unique intents",
            summary.successful, summary.failed, summary.unique_intents
        );

        let report = RunReport {
            run_id: Uuid::new_v4(),
            started_at,
            classifier: classifier.name().to_string(),
            records,
            summary,
            duration_ms: run_start.elapsed().as_millis() as u64,
        };

        self.state = RunState::Completed;
        presenter.completed(&report)?;
        Ok(report)
    }
}
