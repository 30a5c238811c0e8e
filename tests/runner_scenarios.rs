//! Integration tests for the test runner using a scripted classifier.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use intent_harness::cli::{ConsoleReporter, OutputFormat};
use intent_harness::prelude::*;

/// Replies from a fixed script; unknown queries raise.
struct ScriptedClassifier {
    replies: HashMap<String, std::result::Result<ClassificationResult, String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedClassifier {
    fn new(calls: Arc<AtomicUsize>) -> Self {
        ScriptedClassifier {
            replies: HashMap::new(),
            calls,
        }
    }

    fn reply(mut self, query: &str, result: ClassificationResult) -> Self {
        self.replies.insert(query.to_string(), Ok(result));
        self
    }

    fn raise(mut self, query: &str, reason: &str) -> Self {
        self.replies.insert(query.to_string(), Err(reason.to_string()));
        self
    }
}

impl IntentClassifier for ScriptedClassifier {
    fn classify(&self, query: &str) -> anyhow::Result<ClassificationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(query) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(reason)) => Err(anyhow::anyhow!("{reason}")),
            None => Err(anyhow::anyhow!("no scripted reply for {query:?}")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn human_reporter() -> ConsoleReporter<Vec<u8>> {
    ConsoleReporter::new(Vec::new(), OutputFormat::Human)
}

fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_single_state_query() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = ScriptedClassifier::new(calls.clone()).reply(
        "Is payment-api healthy?",
        ClassificationResult::with_primary_intents(["STATE"]),
    );

    let mut runner = TestRunner::new(vec!["Is payment-api healthy?".to_string()], NoDelay);
    let mut reporter = human_reporter();
    let report = runner.run(|| Ok(classifier), &mut reporter)?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.summary.successful, 1);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.summary.total_primary_intents, 1);
    assert_eq!(report.summary.most_common.len(), 1);
    assert_eq!(report.summary.most_common[0].intent, "STATE");
    assert_eq!(report.summary.most_common[0].count, 1);

    let out = output(reporter);
    assert!(out.contains("[1/1] Testing: Is payment-api healthy?"));
    assert!(out.contains("Primary intents: STATE"));
    assert!(out.contains("   STATE: 1"));
    Ok(())
}

#[test]
fn test_one_raised_error_among_eighteen() -> Result<()> {
    let queries: Vec<String> = (1..=18).map(|i| format!("query {i}")).collect();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut classifier = ScriptedClassifier::new(calls.clone());
    for (i, query) in queries.iter().enumerate() {
        classifier = if i == 6 {
            classifier.raise(query, "upstream returned 503")
        } else {
            classifier.reply(query, ClassificationResult::with_primary_intents(["CAUSE"]))
        };
    }

    let mut runner = TestRunner::new(queries, NoDelay);
    let mut reporter = human_reporter();
    let report = runner.run(|| Ok(classifier), &mut reporter)?;

    assert_eq!(calls.load(Ordering::SeqCst), 18);
    assert_eq!(report.summary.total_queries, 18);
    assert_eq!(report.summary.successful, 17);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(runner.state(), RunState::Completed);

    let failed: Vec<usize> = report.failures().map(|r| r.index).collect();
    assert_eq!(failed, vec![7]);

    let out = output(reporter);
    assert!(out.contains("[7/18] Testing: query 7\n❌ Error: upstream returned 503\n"));
    assert!(out.contains("[18/18] Testing: query 18"));
    assert!(out.contains("TEST SUMMARY"));
    assert!(out.contains("Successful classifications: 17"));
    assert!(out.contains("Failed classifications: 1"));
    Ok(())
}

#[test]
fn test_construction_failure_makes_no_attempts() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut runner = TestRunner::new(vec!["Is payment-api healthy?".to_string()], NoDelay);
    let mut reporter = human_reporter();

    let result = runner.run(
        || -> anyhow::Result<ScriptedClassifier> { anyhow::bail!("API key not configured") },
        &mut reporter,
    );

    let err = result.unwrap_err();
    assert!(err.is_initialization());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(runner.state(), RunState::Failed);

    let out = output(reporter);
    assert!(out.contains("❌ Failed to initialize classifier: API key not configured"));
    assert!(!out.contains("Testing:"));
    assert!(!out.contains("TEST SUMMARY"));
}

#[test]
fn test_in_band_errors_count_as_failures() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = ScriptedClassifier::new(calls)
        .reply("a", ClassificationResult::with_primary_intents(["STATE", "TREND"]))
        .reply("b", ClassificationResult::with_error("model overloaded"))
        .reply("c", ClassificationResult::with_primary_intents(["TREND"]))
        .raise("d", "timeout");

    let queries: Vec<String> = ["a", "b", "c", "d"].iter().map(|q| q.to_string()).collect();
    let mut runner = TestRunner::new(queries, NoDelay);
    let mut reporter = human_reporter();
    let report = runner.run(|| Ok(classifier), &mut reporter)?;

    let summary = &report.summary;
    assert_eq!(summary.successful + summary.failed, summary.total_queries);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.total_primary_intents, 3);
    assert_eq!(summary.unique_intents, 2);
    assert_eq!(summary.most_common[0].intent, "TREND");
    assert_eq!(summary.most_common[0].count, 2);

    // The in-band error still reaches the presenter; the raised one does not.
    assert_eq!(report.results().count(), 3);
    let out = output(reporter);
    assert!(out.contains("Classifier error: model overloaded"));
    assert!(out.contains("❌ Error: timeout"));
    Ok(())
}

#[test]
fn test_no_intents_omits_intent_section() -> Result<()> {
    let classifier = ScriptedClassifier::new(Arc::new(AtomicUsize::new(0)))
        .reply("a", ClassificationResult::default())
        .reply("b", ClassificationResult::with_primary_intents(Vec::<String>::new()));

    let mut runner = TestRunner::new(vec!["a".to_string(), "b".to_string()], NoDelay);
    let mut reporter = human_reporter();
    let report = runner.run(|| Ok(classifier), &mut reporter)?;

    assert_eq!(report.summary.successful, 2);
    assert!(report.summary.most_common.is_empty());

    let out = output(reporter);
    assert!(out.contains("TEST SUMMARY"));
    assert!(!out.contains("Most common intents:"));
    Ok(())
}

#[test]
fn test_most_common_sorted_and_capped() -> Result<()> {
    let labels = [
        vec!["STATE"],
        vec!["TREND", "CAUSE"],
        vec!["CAUSE", "IMPACT", "ACTION"],
        vec!["PREDICT", "OPTIMIZE", "CAUSE"],
        vec!["EVIDENCE", "TREND"],
    ];
    let mut classifier = ScriptedClassifier::new(Arc::new(AtomicUsize::new(0)));
    let mut queries = Vec::new();
    for (i, intents) in labels.iter().enumerate() {
        let query = format!("q{i}");
        classifier = classifier.reply(
            &query,
            ClassificationResult::with_primary_intents(intents.iter().copied()),
        );
        queries.push(query);
    }

    let mut runner = TestRunner::new(queries, NoDelay);
    let report = runner.run(|| Ok(classifier), &mut human_reporter())?;
    let summary = &report.summary;

    assert_eq!(summary.total_primary_intents, 11);
    assert_eq!(summary.unique_intents, 8);
    assert_eq!(summary.most_common.len(), 5);
    assert!(
        summary
            .most_common
            .windows(2)
            .all(|pair| pair[0].count >= pair[1].count)
    );

    let top: Vec<(&str, usize)> = summary
        .most_common
        .iter()
        .map(|c| (c.intent.as_str(), c.count))
        .collect();
    assert_eq!(
        top,
        vec![
            ("CAUSE", 3),
            ("TREND", 2),
            ("STATE", 1),
            ("IMPACT", 1),
            ("ACTION", 1)
        ]
    );
    Ok(())
}

#[test]
fn test_pacer_runs_after_every_attempt() -> Result<()> {
    struct Recorder(Arc<AtomicUsize>);

    impl Pacer for Recorder {
        fn pause(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let pauses = Arc::new(AtomicUsize::new(0));
    let classifier = ScriptedClassifier::new(Arc::new(AtomicUsize::new(0)))
        .reply("ok", ClassificationResult::with_primary_intents(["STATE"]))
        .raise("bad", "boom");

    let queries = vec!["ok".to_string(), "bad".to_string(), "ok".to_string()];
    let mut runner = TestRunner::new(queries, Recorder(pauses.clone()));
    runner.run(|| Ok(classifier), &mut human_reporter())?;

    assert_eq!(pauses.load(Ordering::SeqCst), 3);
    Ok(())
}
