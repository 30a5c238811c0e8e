//! Command line argument parsing for the intent harness using clap.
//!
//! Every flag is optional. Without arguments the harness runs the built-in
//! suite through the keyword backend with a 500 ms delay between queries.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Intent harness - drive an intent classifier through a query suite
#[derive(Parser, Debug, Clone)]
#[command(name = "intent-harness")]
#[command(about = "Run a query suite through an intent classifier and summarize the detected intents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HarnessArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Classifier backend
    #[arg(
        short,
        long,
        value_enum,
        default_value = "keyword",
        env = "INTENT_HARNESS_BACKEND"
    )]
    pub backend: Backend,

    /// Training samples for the tfidf backend (JSON array of {query, intent})
    #[arg(long, value_name = "FILE", env = "INTENT_HARNESS_TRAINING_DATA")]
    pub training_data: Option<PathBuf>,

    /// Query suite file (JSON array, or one query per line)
    #[arg(long, value_name = "FILE")]
    pub queries: Option<PathBuf>,

    /// Delay after every query in milliseconds
    #[arg(long, default_value = "500", env = "INTENT_HARNESS_DELAY_MS")]
    pub delay_ms: u64,

    /// Number of most common intents to list
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Fraction of the best score another intent needs to be primary
    #[arg(long, value_name = "RATIO")]
    pub primary_ratio: Option<f64>,

    /// Lowest average similarity the tfidf backend accepts
    #[arg(long, value_name = "SCORE")]
    pub min_similarity: Option<f64>,
}

impl HarnessArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Classifier backends selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Cue word and phrase matching
    Keyword,
    /// TF-IDF similarity to labelled samples
    Tfidf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = HarnessArgs::try_parse_from(["intent-harness"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Human);
        assert_eq!(args.backend, Backend::Keyword);
        assert_eq!(args.delay_ms, 500);
        assert_eq!(args.top, 5);
        assert!(args.queries.is_none());
        assert!(args.primary_ratio.is_none());
        assert!(args.min_similarity.is_none());
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_tfidf_backend_with_training_data() {
        let args = HarnessArgs::try_parse_from([
            "intent-harness",
            "--backend",
            "tfidf",
            "--training-data",
            "samples.json",
            "--delay-ms",
            "0",
            "-f",
            "json",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(args.backend, Backend::Tfidf);
        assert_eq!(args.training_data, Some(PathBuf::from("samples.json")));
        assert_eq!(args.delay_ms, 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }

    #[test]
    fn test_verbosity() {
        let args = HarnessArgs::try_parse_from(["intent-harness", "-vvv"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = HarnessArgs::try_parse_from(["intent-harness", "-vv", "--quiet"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_invalid_backend_rejected() {
        assert!(HarnessArgs::try_parse_from(["intent-harness", "--backend", "llm"]).is_err());
    }
}
