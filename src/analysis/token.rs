//! Token types for text analysis.

use serde::{Deserialize, Serialize};

/// A single analyzed token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The normalized text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let end_offset = text.len();
        Token {
            text,
            position,
            start_offset: 0,
            end_offset,
        }
    }

    /// Set the byte offsets of this token in the original text.
    pub fn with_offsets(mut self, start_offset: usize, end_offset: usize) -> Self {
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        self
    }
}

/// A boxed iterator over tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
