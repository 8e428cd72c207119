//! Token types for text analysis.

use std::fmt;

/// A token is a single unit of text produced by a tokenizer.
///
/// Tokens carry their position in the original token stream so that filters
/// which drop tokens (stop words, short tokens) do not disturb the relative
/// order of the survivors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token's text content.
    pub text: String,

    /// Position in the token stream (0-based, assigned by the tokenizer).
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Return a copy of this token with different text, keeping the position.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            position: self.position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.position)
    }
}

/// A stream of tokens flowing through the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
