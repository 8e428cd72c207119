//! Analyzer combining a tokenizer with a chain of filters.
//!
//! An [`Analyzer`] is the single capability the rest of the crate depends on:
//! `preprocess(text)` yields the ordered sequence of normalized terms that
//! the index and both retrieval models agree on. Implementations must be
//! deterministic; the index caches nothing about the analyzer beyond what it
//! derives from its output.
//!
//! # Examples
//!
//! ```
//! use ranklab::analysis::analyzer::{Analyzer, standard_analyzer};
//!
//! let analyzer = standard_analyzer();
//! let terms = analyzer.preprocess("The boundary layers were heated").unwrap();
//! assert_eq!(terms, vec!["boundari", "layer", "heat"]);
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LengthFilter, LowercaseFilter, StemFilter, StopFilter};
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::error::Result;

/// Trait for analyzers that convert text into normalized terms.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text into a token stream.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Analyze the given text and collect the term texts in order.
    fn preprocess(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

/// A configurable analyzer that combines a tokenizer with a filter chain.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer and no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

/// Build the standard analysis pipeline: alphabetic word extraction,
/// lowercasing, single-character token removal, English stop word removal
/// and Porter stemming.
pub fn standard_analyzer() -> Arc<dyn Analyzer> {
    Arc::new(build_standard(true, true))
}

/// Build the standard pipeline with stemming and stop word removal toggled
/// individually, for comparing preprocessing variants.
pub fn standard_analyzer_with(stemming: bool, stop_words: bool) -> Arc<dyn Analyzer> {
    Arc::new(build_standard(stemming, stop_words))
}

fn build_standard(stemming: bool, stop_words: bool) -> PipelineAnalyzer {
    let mut analyzer = PipelineAnalyzer::new(Arc::new(WordTokenizer::new()))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(LengthFilter::default()));

    if stop_words {
        analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
    }
    if stemming {
        analyzer = analyzer.add_filter(Arc::new(StemFilter::new()));
    }

    analyzer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    #[test]
    fn test_standard_analyzer_pipeline() {
        let analyzer = standard_analyzer();
        let terms = analyzer
            .preprocess("The experimental investigation of aerodynamic heating!")
            .unwrap();

        assert_eq!(terms, vec!["experiment", "investig", "aerodynam", "heat"]);
    }

    #[test]
    fn test_standard_analyzer_drops_stop_words_and_short_tokens() {
        let analyzer = standard_analyzer();
        let terms = analyzer.preprocess("a theory of the M 2 flow").unwrap();

        assert_eq!(terms, vec!["theori", "flow"]);
    }

    #[test]
    fn test_standard_analyzer_without_stemming() {
        let analyzer = standard_analyzer_with(false, true);
        let terms = analyzer.preprocess("heating effects").unwrap();

        assert_eq!(terms, vec!["heating", "effects"]);
    }

    #[test]
    fn test_standard_analyzer_without_stop_words() {
        let analyzer = standard_analyzer_with(false, false);
        let terms = analyzer.preprocess("the cat sat").unwrap();

        assert_eq!(terms, vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_empty_text_yields_no_terms() {
        let analyzer = standard_analyzer();
        assert!(analyzer.preprocess("").unwrap().is_empty());
        assert!(analyzer.preprocess("42 + 17").unwrap().is_empty());
    }

    #[test]
    fn test_determinism() {
        let analyzer = standard_analyzer();
        let text = "Shear buckling of square perforated plates";
        assert_eq!(
            analyzer.preprocess(text).unwrap(),
            analyzer.preprocess(text).unwrap()
        );
    }

    #[test]
    fn test_custom_pipeline() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        let terms = analyzer.preprocess("The CAT sat").unwrap();

        assert_eq!(terms, vec!["the", "cat", "sat"]);
    }
}
