//! Output formatting for harness runs.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::classifier::ClassificationResult;
use crate::cli::args::OutputFormat;
use crate::error::{HarnessError, Result};
use crate::harness::report::RunReport;
use crate::harness::runner::RunPresenter;

const RULE_WIDTH: usize = 80;

/// Writes run progress and results to a stream.
///
/// In human format the output mirrors a console test run: a banner, one
/// `[i/N] Testing:` line per query followed by the result or an error line,
/// and a summary block. In JSON format each result or failure is one JSON
/// line and the final report is a single JSON document.
pub struct ConsoleReporter<W: Write> {
    out: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        ConsoleReporter {
            out,
            format,
            pretty: false,
        }
    }

    /// Pretty-print the final JSON report.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    fn rule(&mut self) -> Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn json_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let line = serde_json::to_string(value)?;
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn write_summary_human(&mut self, report: &RunReport) -> Result<()> {
        let summary = &report.summary;

        writeln!(self.out)?;
        self.rule()?;
        writeln!(self.out, "TEST SUMMARY")?;
        self.rule()?;
        writeln!(self.out)?;
        writeln!(self.out, "Total queries tested: {}", summary.total_queries)?;
        writeln!(self.out, "Successful classifications: {}", summary.successful)?;
        writeln!(self.out, "Failed classifications: {}", summary.failed)?;

        if summary.has_intents() {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "Total primary intents detected: {}",
                summary.total_primary_intents
            )?;
            writeln!(self.out, "Unique intents detected: {}", summary.unique_intents)?;
            writeln!(self.out)?;
            writeln!(self.out, "Most common intents:")?;
            for entry in &summary.most_common {
                writeln!(self.out, "   {}: {}", entry.intent, entry.count)?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "Total time: {}", format_duration(report.duration_ms))?;
        writeln!(self.out)?;
        self.rule()?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> RunPresenter for ConsoleReporter<W> {
    fn initializing(&mut self) -> Result<()> {
        if self.is_human() {
            self.rule()?;
            writeln!(self.out, "TESTING INTENT CLASSIFIER")?;
            self.rule()?;
            writeln!(self.out)?;
            writeln!(self.out, "Initializing classifier...")?;
        }
        Ok(())
    }

    fn initialized(&mut self, classifier: &str) -> Result<()> {
        if self.is_human() {
            writeln!(
                self.out,
                "✅ Classifier initialized successfully! (backend: {classifier})"
            )?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn initialization_failed(&mut self, error: &HarnessError) -> Result<()> {
        let message = match error {
            HarnessError::Initialization(msg) => msg.clone(),
            other => other.to_string(),
        };
        if self.is_human() {
            writeln!(self.out, "❌ Failed to initialize classifier: {message}")?;
        } else {
            self.json_line(&serde_json::json!({
                "status": "initialization_failed",
                "error": message,
            }))?;
        }
        Ok(())
    }

    fn run_started(&mut self, total: usize) -> Result<()> {
        if self.is_human() {
            writeln!(self.out, "Running {total} test queries...")?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn attempt(&mut self, index: usize, total: usize, query: &str) -> Result<()> {
        if self.is_human() {
            writeln!(self.out, "[{index}/{total}] Testing: {query}")?;
        }
        Ok(())
    }

    fn print_result(&mut self, result: &ClassificationResult) -> Result<()> {
        if self.is_human() {
            let rendered = render_result_human(result);
            write!(self.out, "{rendered}")?;
            writeln!(self.out)?;
            Ok(())
        } else {
            self.json_line(result)
        }
    }

    fn failure(&mut self, index: usize, reason: &str) -> Result<()> {
        if self.is_human() {
            writeln!(self.out, "❌ Error: {reason}")?;
            writeln!(self.out)?;
            Ok(())
        } else {
            self.json_line(&serde_json::json!({ "index": index, "error": reason }))
        }
    }

    fn completed(&mut self, report: &RunReport) -> Result<()> {
        if self.is_human() {
            self.write_summary_human(report)
        } else if self.pretty {
            let document = serde_json::to_string_pretty(report)?;
            writeln!(self.out, "{document}")?;
            Ok(())
        } else {
            self.json_line(report)
        }
    }
}

/// Render one classification result as indented lines.
pub fn render_result_human(result: &ClassificationResult) -> String {
    let mut lines = Vec::new();

    if let Some(error) = &result.error {
        lines.push(format!("   ⚠️  Classifier error: {error}"));
    }
    if let Some(intents) = &result.primary_intents {
        let intents = if intents.is_empty() {
            "none".to_string()
        } else {
            intents.join(", ")
        };
        lines.push(format!("   🎯 Primary intents: {intents}"));
    }
    for (key, value) in &result.extra {
        lines.push(format!("   {}: {}", humanize_key(key), format_value(value)));
    }

    let mut rendered = lines.join("\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }
    rendered
}

/// `secondary_intents` -> `Secondary intents`.
fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a JSON value for display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.2}"),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) if arr.is_empty() => "none".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => "null".to_string(),
    }
}

/// Format milliseconds for the summary.
fn format_duration(duration_ms: u64) -> String {
    if duration_ms < 1000 {
        format!("{duration_ms}ms")
    } else {
        format!("{:.2}s", duration_ms as f64 / 1000.0)
    }
}
