//! Error types for the intent harness.
//!
//! All fallible harness operations return [`HarnessError`] through the
//! crate-wide [`Result`] alias. Classifier backends work with
//! `anyhow::Result`; the runner turns a failed construction into
//! [`HarnessError::Initialization`] and a failed classify call into a
//! per-query failure message.
//!
//! # Examples
//!
//! ```
//! use intent_harness::error::{HarnessError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(HarnessError::invalid_config("query file is empty"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for harness operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// I/O errors (query files, training data, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The classifier could not be constructed.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Invalid configuration or input files.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation for the current runner state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with HarnessError.
pub type Result<T> = std::result::Result<T, HarnessError>;

impl HarnessError {
    /// Create a new initialization error.
    pub fn initialization<S: Into<String>>(msg: S) -> Self {
        HarnessError::Initialization(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HarnessError::Config(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        HarnessError::InvalidOperation(msg.into())
    }

    /// Whether this error ended the run before any query was attempted.
    pub fn is_initialization(&self) -> bool {
        matches!(self, HarnessError::Initialization(_))
    }
}
