//! Tokenizer implementations.
//!
//! Tokenizers are the first stage of the analysis pipeline: they split raw
//! text into [`Token`]s. Two strategies are provided:
//!
//! - [`WordTokenizer`] extracts contiguous runs of ASCII letters, the
//!   behaviour expected for English test collections.
//! - [`WhitespaceTokenizer`] splits on whitespace only, useful for tests
//!   and for corpora that are already normalized.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for tokenizers that convert text into a token stream.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// Pattern for contiguous runs of ASCII letters.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid word pattern"));

/// Tokenizer that extracts alphabetic words.
///
/// Digits and punctuation are treated as separators, so `"mach-2 flow"`
/// yields the tokens `mach`, `flow`. Case is preserved; lowercasing is the
/// job of [`LowercaseFilter`](crate::analysis::token_filter::LowercaseFilter).
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer.
    pub fn new() -> Self {
        WordTokenizer
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = WORD_PATTERN
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token::new(m.as_str(), position))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}

/// Tokenizer that splits text on whitespace.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_whitespace()
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect();
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer
            .tokenize("Supersonic flow at mach-2 speeds!")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Supersonic", "flow", "at", "mach", "speeds"]);
        assert_eq!(tokens[3].position, 3);
    }

    #[test]
    fn test_word_tokenizer_splits_apostrophes() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("don't").unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["don", "t"]);
    }

    #[test]
    fn test_word_tokenizer_empty_input() {
        let tokenizer = WordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("12 34 --").unwrap().collect();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("the cat  sat").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "the");
        assert_eq!(tokens[2].text, "sat");
        assert_eq!(tokens[2].position, 2);
    }
}
