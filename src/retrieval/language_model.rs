//! Unigram language-model retrieval with Dirichlet smoothing.
//!
//! Each document is treated as a unigram language model and queries are
//! scored by log-likelihood. Document term probabilities blend the document's
//! maximum-likelihood estimate with the collection background model:
//!
//! ```text
//! P(t|d) = (count(t,d) + mu * P(t|C)) / (length(d) + mu)
//! ```
//!
//! Larger `mu` trusts the collection more; smaller `mu` trusts the document's
//! own counts. Short documents are pulled harder toward the background model.
//!
//! Unlike the vector-space model, retrieval keeps every document: scores are
//! log-likelihoods (typically negative) and carry no natural zero cutoff.

use std::sync::Arc;

use crate::error::{RanklabError, Result};
use crate::index::{DocId, InvertedIndex};
use crate::retrieval::{RetrievalModel, ScoredDoc, rank_results};

/// Default Dirichlet smoothing strength.
pub const DEFAULT_MU: f64 = 2000.0;

/// Dirichlet-smoothed unigram language model over a frozen index.
pub struct UnigramLanguageModel {
    index: Arc<InvertedIndex>,
    mu: f64,
}

impl std::fmt::Debug for UnigramLanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnigramLanguageModel")
            .field("mu", &self.mu)
            .finish()
    }
}

impl UnigramLanguageModel {
    /// Create a language model over a built index with the default `mu`.
    ///
    /// Returns an error if the index was never built.
    pub fn new(index: Arc<InvertedIndex>) -> Result<Self> {
        Self::with_mu(index, DEFAULT_MU)
    }

    /// Create a language model with a custom smoothing strength.
    pub fn with_mu(index: Arc<InvertedIndex>, mu: f64) -> Result<Self> {
        if !index.is_built() {
            return Err(RanklabError::index(
                "language model requires a built index",
            ));
        }
        Ok(UnigramLanguageModel { index, mu })
    }

    /// The current smoothing strength.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Set the smoothing strength. Not adaptive; applies to all subsequent
    /// scoring.
    pub fn set_mu(&mut self, mu: f64) {
        self.mu = mu;
    }

    /// Dirichlet-smoothed probability of a term under a document's model.
    pub fn document_prob(&self, term: &str, doc_id: DocId) -> f64 {
        let count = f64::from(self.index.term_count_in_doc(term, doc_id));
        let length = f64::from(self.index.doc_length(doc_id));
        let collection_prob = self.index.collection_prob(term);

        (count + self.mu * collection_prob) / (length + self.mu)
    }

    /// Log-likelihood of the query terms under a document's model.
    ///
    /// Terms whose smoothed probability is not positive are skipped; this
    /// only happens for terms absent from both the document and the entire
    /// collection, which contribute no signal rather than `ln(0)`.
    pub fn score_document(&self, query_terms: &[String], doc_id: DocId) -> f64 {
        let mut log_likelihood = 0.0;

        for term in query_terms {
            let prob = self.document_prob(term, doc_id);
            if prob > 0.0 {
                log_likelihood += prob.ln();
            }
        }

        log_likelihood
    }
}

impl RetrievalModel for UnigramLanguageModel {
    /// Score every document against the query and return the `top_k` best.
    ///
    /// No score filtering is applied: the result always contains
    /// `min(top_k, num_docs)` documents for a non-empty query.
    fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDoc>> {
        let query_terms = self.index.analyzer().preprocess(query)?;
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored = Vec::with_capacity(self.index.num_docs());
        for &doc_id in self.index.doc_ids() {
            scored.push(ScoredDoc {
                doc_id,
                score: self.score_document(&query_terms, doc_id),
            });
        }

        self.index.observer().on_query_scored(self.name(), scored.len());

        Ok(rank_results(scored, top_k))
    }

    fn name(&self) -> &'static str {
        "unigram-lm"
    }
}
