//! Token filter implementations.
//!
//! Filters are applied after tokenization, each consuming a token stream and
//! producing a new one. The default pipeline chains [`LowercaseFilter`],
//! [`LengthFilter`], [`StopFilter`] and [`StemFilter`] in that order.

use std::collections::HashSet;
use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for token filters.
pub trait Filter: Send + Sync {
    /// Filter the given token stream, producing a new stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}

/// Filter that lowercases token text.
#[derive(Debug, Clone, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .map(|token| {
                let lowered = token.text.to_lowercase();
                token.with_text(lowered)
            })
            .collect();
        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// Filter that removes tokens shorter than a minimum length.
///
/// Single-character tokens carry almost no retrieval signal in English test
/// collections, so the default pipeline drops them.
#[derive(Debug, Clone)]
pub struct LengthFilter {
    /// Minimum token length in characters (inclusive).
    min_length: usize,
}

impl LengthFilter {
    /// Create a length filter with the given minimum length.
    pub fn new(min_length: usize) -> Self {
        LengthFilter { min_length }
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        LengthFilter { min_length: 2 }
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_length = self.min_length;
        let filtered: Vec<Token> = tokens
            .filter(|token| token.text.chars().count() >= min_length)
            .collect();
        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

/// Default English stop word list.
///
/// The standard 170-odd word list used by most English retrieval pipelines.
/// Contracted forms ("aren't") are listed as-is; whether they survive depends
/// on the tokenizer in front of this filter.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over",
    "own", "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so",
    "some", "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves",
    "then", "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't",
    "we", "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when",
    "when's", "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's",
    "with", "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your",
    "yours", "yourself", "yourselves",
];

static ENGLISH_STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DEFAULT_ENGLISH_STOP_WORDS.iter().copied().collect());

/// Filter that removes stop words.
#[derive(Debug, Clone)]
pub struct StopFilter {
    /// The set of words to remove.
    stop_words: HashSet<String>,
}

impl StopFilter {
    /// Create a stop filter with the default English stop word list.
    pub fn new() -> Self {
        StopFilter {
            stop_words: ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Create a stop filter from a custom word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of stop words in this filter.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Whether the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .filter(|token| !self.stop_words.contains(token.text.as_str()))
            .collect();
        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

/// Filter that reduces tokens to their stems.
pub struct StemFilter {
    /// The Snowball stemmer instance.
    stemmer: Stemmer,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter").finish_non_exhaustive()
    }
}

impl StemFilter {
    /// Create a stem filter for English.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .map(|token| {
                let stemmed = self.stemmer.stem(&token.text).to_string();
                token.with_text(stemmed)
            })
            .collect();
        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
