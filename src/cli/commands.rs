//! Command implementation for the intent harness CLI.

use std::io::{self, Write};
use std::sync::Arc;

use log::{info, warn};

use crate::analysis::{Analyzer, StandardAnalyzer};
use crate::classifier::{
    self, IntentClassifier, KeywordBasedIntentClassifier, MLBasedIntentClassifier,
};
use crate::cli::args::{Backend, HarnessArgs};
use crate::cli::output::ConsoleReporter;
use crate::error::{HarnessError, Result};
use crate::harness::pacer::FixedDelay;
use crate::harness::queries::{default_queries, load_queries};
use crate::harness::report::RunReport;
use crate::harness::runner::TestRunner;

/// Execute the harness, reporting to stdout.
pub fn execute_command(args: HarnessArgs) -> Result<()> {
    let stdout = io::stdout();
    run_suite(&args, stdout.lock())?;
    Ok(())
}

/// Run the configured suite, writing the report to `out`.
pub fn run_suite<W: Write>(args: &HarnessArgs, out: W) -> Result<RunReport> {
    let queries = match &args.queries {
        Some(path) => {
            info!("Loading queries from {}", path.display());
            load_queries(path)?
        }
        None => default_queries(),
    };

    let mut reporter = ConsoleReporter::new(out, args.output_format).pretty(args.pretty);
    let mut runner =
        TestRunner::new(queries, FixedDelay::from_millis(args.delay_ms)).top_intents(args.top);

    runner.run(|| build_classifier(args), &mut reporter)
}

/// Construct the classifier selected by `args`.
pub fn build_classifier(args: &HarnessArgs) -> anyhow::Result<Box<dyn IntentClassifier>> {
    let analyzer: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new());

    match args.backend {
        Backend::Keyword => {
            if args.training_data.is_some() {
                warn!("--training-data is ignored by the keyword backend");
            }
            if args.min_similarity.is_some() {
                warn!("--min-similarity is ignored by the keyword backend");
            }
            let mut classifier = KeywordBasedIntentClassifier::with_default_cues(analyzer)?;
            if let Some(ratio) = args.primary_ratio {
                classifier = classifier.primary_ratio(ratio);
            }
            Ok(Box::new(classifier))
        }
        Backend::Tfidf => {
            let samples = match &args.training_data {
                Some(path) => {
                    info!("Loading training data from {}", path.display());
                    classifier::load_training_data(path)?
                }
                None => classifier::default_training_samples(),
            };
            let mut classifier = MLBasedIntentClassifier::new(samples, analyzer)?;
            if let Some(ratio) = args.primary_ratio {
                classifier = classifier.primary_ratio(ratio);
            }
            if let Some(min_similarity) = args.min_similarity {
                classifier = classifier.min_similarity(min_similarity);
            }
            info!("Trained tfidf classifier on {} intents", classifier.intent_count());
            Ok(Box::new(classifier))
        }
    }
}

/// The message `main` prints for a failed run.
///
/// Initialization failures were already shown by the reporter and yield
/// `None`.
pub fn exit_message(error: &HarnessError) -> Option<String> {
    if error.is_initialization() {
        None
    } else {
        Some(format!("Error: {error}"))
    }
}
