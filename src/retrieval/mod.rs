//! Retrieval models built on the inverted index.
//!
//! Two independent ranking models read the same frozen index:
//!
//! - [`VectorSpaceModel`](vector_space::VectorSpaceModel): TF-IDF weighted
//!   cosine similarity.
//! - [`UnigramLanguageModel`](language_model::UnigramLanguageModel):
//!   Dirichlet-smoothed query log-likelihood.
//!
//! Both produce [`ScoredDoc`] rankings ordered by score descending with ties
//! broken by ascending document id, so rankings are a total order independent
//! of any map iteration accident. The two models deliberately differ in one
//! respect: the vector-space model drops documents whose similarity is
//! exactly zero, while the language model ranks every document.

pub mod language_model;
pub mod vector_space;

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::Result;
use crate::index::DocId;

pub use language_model::UnigramLanguageModel;
pub use vector_space::VectorSpaceModel;

/// A document with its retrieval score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDoc {
    /// The document id.
    pub doc_id: DocId,

    /// The model-specific score. Cosine similarities are non-negative;
    /// language-model log-likelihoods are typically negative.
    pub score: f64,
}

/// Trait for retrieval models that rank documents for a text query.
pub trait RetrievalModel: Send + Sync {
    /// Retrieve up to `top_k` documents for the query, best first.
    fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDoc>>;

    /// Get the name of this model.
    fn name(&self) -> &'static str;
}

/// Sort scored documents by score descending, document id ascending, and
/// truncate to `top_k`.
pub fn rank_results(mut scored: Vec<ScoredDoc>, top_k: usize) -> Vec<ScoredDoc> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    scored.truncate(top_k);
    scored
}
