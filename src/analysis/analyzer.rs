//! Analyzers that convert raw query text into normalized tokens.
//!
//! # Examples
//!
//! ```
//! use intent_harness::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("Is payment-api healthy?").unwrap().collect();
//!
//! // "is" is removed as a stop word, the hyphenated name is split
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "payment");
//! assert_eq!(tokens[2].text, "healthy");
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

static DEFAULT_STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_ENGLISH_STOP_WORDS.iter().copied().collect());

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;
}

/// Unicode word segmentation, lowercasing and English stop word removal.
///
/// Interrogatives ("why", "how", "what") are not stop words.
#[derive(Debug, Clone)]
pub struct StandardAnalyzer {
    remove_stop_words: bool,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Self {
        StandardAnalyzer {
            remove_stop_words: true,
        }
    }

    /// Create a new standard analyzer without stop word filtering.
    pub fn without_stop_words() -> Self {
        StandardAnalyzer {
            remove_stop_words: false,
        }
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.remove_stop_words && DEFAULT_STOP_WORDS.contains(word)
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for (offset, word) in text.unicode_word_indices() {
            let normalized = word.to_lowercase();
            if self.is_stop_word(&normalized) {
                continue;
            }
            let position = tokens.len();
            tokens.push(Token::new(normalized, position).with_offsets(offset, offset + word.len()));
        }
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        if self.remove_stop_words {
            "standard"
        } else {
            "standard_no_stop"
        }
    }
}
