//! The query suite a run drives through the classifier.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{HarnessError, Result};

/// Built-in suite, grouped by the category each query is meant to exercise.
pub const DEFAULT_QUERIES: &[&str] = &[
    // STATE
    "How is my application now?",
    "Is payment-api healthy?",
    "Which SLOs are breached?",
    // TREND
    "What is drifting in last 1h?",
    "Today vs last month",
    // PATTERN
    "Have we seen this before?",
    // CAUSE
    "Why is payment-api failing?",
    "Why multiple services unhealthy?",
    // IMPACT
    "What else breaks if this fails?",
    "Which customers are affected?",
    // ACTION
    "How do I fix this now?",
    "Should I rollback this change?",
    // PREDICT
    "What might fail next?",
    "Is this deployment risky?",
    // OPTIMIZE
    "What is slowing us down?",
    "Which queries are costly?",
    // EVIDENCE
    "Show evidence for RCA",
    "What happened step-by-step?",
    // multiple intents
    "What alerts are active and what incidents are open?",
    "Are we meeting our SLOs and what's the trend?",
];

/// The built-in suite as owned strings.
pub fn default_queries() -> Vec<String> {
    DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect()
}

/// Load a query suite from a file.
///
/// A file holding a JSON array of strings is read as such. Anything else is
/// one query per line, skipping blank lines and lines starting with `#`.
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let queries = match serde_json::from_str::<Vec<String>>(&content) {
        Ok(queries) => queries,
        Err(e) => {
            if content.trim_start().starts_with('[') {
                debug!("{} is not a JSON array ({e}), reading it line by line", path.display());
            }
            parse_lines(&content)
        }
    };

    if queries.is_empty() {
        return Err(HarnessError::invalid_config(format!(
            "no queries found in {}",
            path.display()
        )));
    }

    Ok(queries)
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_suite() {
        let queries = default_queries();
        assert_eq!(queries.len(), 20);
        assert_eq!(queries[1], "Is payment-api healthy?");
        assert!(queries.iter().all(|q| !q.trim().is_empty()));
    }

    #[test]
    fn test_load_line_delimited() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# state").unwrap();
        writeln!(file, "Is search healthy?").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Why is search slow?  ").unwrap();

        let queries = load_queries(file.path()).unwrap();
        assert_eq!(queries, vec!["Is search healthy?", "Why is search slow?"]);
    }

    #[test]
    fn test_load_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"["What might fail next?", "# not a comment in JSON"]"##).unwrap();

        let queries = load_queries(file.path()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1], "# not a comment in JSON");
    }

    #[test]
    fn test_bracketed_first_line_is_not_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[prod] is api healthy?").unwrap();
        writeln!(file, "[staging] why is checkout slow?").unwrap();

        let queries = load_queries(file.path()).unwrap();
        assert_eq!(
            queries,
            vec!["[prod] is api healthy?", "[staging] why is checkout slow?"]
        );
    }

    #[test]
    fn test_load_empty_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# only comments").unwrap();

        match load_queries(file.path()) {
            Err(HarnessError::Config(msg)) => assert!(msg.contains("no queries found")),
            other => panic!("Expected config error, got {other:?}"),
        }
    }
}
