//! Common types for intent classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Training sample for intent classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentSample {
    /// Query text.
    pub query: String,
    /// Intent label.
    pub intent: String,
}

impl IntentSample {
    /// Create a new training sample.
    pub fn new<Q: Into<String>, I: Into<String>>(query: Q, intent: I) -> Self {
        IntentSample {
            query: query.into(),
            intent: intent.into(),
        }
    }
}

/// Operational intent categories recognized by the bundled backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntentCategory {
    /// Current health or status of a system.
    State,
    /// Change over a time window.
    Trend,
    /// Recurrence of something seen before.
    Pattern,
    /// Root cause of a failure.
    Cause,
    /// Blast radius of a failure.
    Impact,
    /// What to do about it.
    Action,
    /// What is likely to happen next.
    Predict,
    /// Cost or performance improvements.
    Optimize,
    /// Supporting evidence and timelines.
    Evidence,
}

impl IntentCategory {
    /// All categories in display order.
    pub const ALL: [IntentCategory; 9] = [
        IntentCategory::State,
        IntentCategory::Trend,
        IntentCategory::Pattern,
        IntentCategory::Cause,
        IntentCategory::Impact,
        IntentCategory::Action,
        IntentCategory::Predict,
        IntentCategory::Optimize,
        IntentCategory::Evidence,
    ];

    /// The label reported in `primary_intents`.
    pub fn label(&self) -> &'static str {
        match self {
            IntentCategory::State => "STATE",
            IntentCategory::Trend => "TREND",
            IntentCategory::Pattern => "PATTERN",
            IntentCategory::Cause => "CAUSE",
            IntentCategory::Impact => "IMPACT",
            IntentCategory::Action => "ACTION",
            IntentCategory::Predict => "PREDICT",
            IntentCategory::Optimize => "OPTIMIZE",
            IntentCategory::Evidence => "EVIDENCE",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IntentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntentCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown intent category: {s}"))
    }
}

/// The result of classifying one query.
///
/// Only `error` and `primary_intents` are interpreted by the harness. Any
/// other field a backend reports (confidence, secondary intents, reasoning)
/// is carried in `extra` and only ever shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// In-band failure reported by the classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Primary intent labels, most relevant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_intents: Option<Vec<String>>,
    /// Opaque backend-specific fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClassificationResult {
    /// Create a successful result with the given primary intents.
    pub fn with_primary_intents<I, S>(intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassificationResult {
            primary_intents: Some(intents.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Create a result that carries an in-band error.
    pub fn with_error<S: Into<String>>(error: S) -> Self {
        ClassificationResult {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Attach an opaque field.
    pub fn with_field<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// A result is successful when it carries no `error`.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Primary intents, or an empty slice when the field is absent.
    pub fn primary_intents(&self) -> &[String] {
        self.primary_intents.as_deref().unwrap_or_default()
    }
}
