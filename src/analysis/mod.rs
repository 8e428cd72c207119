//! Text analysis pipeline.
//!
//! This module turns raw text into the ordered sequence of normalized terms
//! consumed by the index and the retrieval models. Analysis is deterministic:
//! the same input always produces the same terms, which is what makes index
//! statistics and rankings reproducible.
//!
//! The pipeline follows the classic tokenizer-plus-filters design:
//!
//! 1. A [`Tokenizer`](tokenizer::Tokenizer) splits text into tokens.
//! 2. A chain of [`Filter`](token_filter::Filter)s transforms or drops tokens
//!    (lowercasing, length limits, stop words, stemming).
//!
//! [`standard_analyzer`](analyzer::standard_analyzer) builds the default
//! pipeline: alphabetic word extraction, lowercasing, single-character token
//! removal, English stop word removal, and Porter stemming.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer, standard_analyzer};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LengthFilter, LowercaseFilter, StemFilter, StopFilter};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer, WordTokenizer};
