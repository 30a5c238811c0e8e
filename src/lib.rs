//! # Intent Harness
//!
//! Drives an intent classifier through a fixed suite of operational
//! questions and reports what it detected.
//!
//! ## Features
//!
//! - Sequential, paced runs with per-query failure isolation
//! - Two failure channels handled: raised errors and in-band `error` fields
//! - Intent frequency summary with stable tie ordering
//! - Bundled keyword and TF-IDF classifier backends
//! - Human and JSON report formats

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod error;
pub mod harness;

pub mod prelude {
    pub use crate::classifier::{ClassificationResult, IntentCategory, IntentClassifier};
    pub use crate::error::{HarnessError, Result};
    pub use crate::harness::{
        FixedDelay, NoDelay, Pacer, QueryOutcome, RunPresenter, RunReport, RunState, RunSummary,
        TestRunner,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
