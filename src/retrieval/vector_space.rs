//! Vector-space retrieval with TF-IDF weighting and cosine similarity.
//!
//! Documents and queries are represented as sparse term-weight vectors with
//! weight `tf * idf`, where `tf` is the raw proportion `count / length` (not
//! log-scaled). Only terms with a nonzero weight are materialized, so every
//! stored entry is nonzero and the magnitude of a vector is simply the L2
//! norm of its entries.
//!
//! Retrieval scores every document in the collection and discards documents
//! whose cosine similarity is exactly zero before ranking. A document
//! sharing no terms with the query therefore never appears in the output,
//! even at depths larger than the collection. The language model does not
//! share this filter; the asymmetry is intentional and kept as specified.

use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{RanklabError, Result};
use crate::index::{DocId, InvertedIndex};
use crate::retrieval::{RetrievalModel, ScoredDoc, rank_results};

/// A sparse term-weight vector.
pub type TermVector = AHashMap<String, f64>;

/// TF-IDF vector-space retrieval model over a frozen index.
///
/// Document vectors and magnitudes are precomputed at construction; the
/// index is immutable after build, so per-query recomputation would produce
/// identical values.
pub struct VectorSpaceModel {
    index: Arc<InvertedIndex>,
    doc_vectors: AHashMap<DocId, TermVector>,
    doc_magnitudes: AHashMap<DocId, f64>,
}

impl std::fmt::Debug for VectorSpaceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorSpaceModel")
            .field("num_docs", &self.doc_vectors.len())
            .finish()
    }
}

impl VectorSpaceModel {
    /// Create a vector-space model over a built index.
    ///
    /// Returns an error if the index was never built.
    pub fn new(index: Arc<InvertedIndex>) -> Result<Self> {
        if !index.is_built() {
            return Err(RanklabError::index(
                "vector space model requires a built index",
            ));
        }

        let mut doc_vectors = AHashMap::with_capacity(index.num_docs());
        let mut doc_magnitudes = AHashMap::with_capacity(index.num_docs());

        for &doc_id in index.doc_ids() {
            let vector = Self::compute_document_vector(&index, doc_id);
            doc_magnitudes.insert(doc_id, magnitude(&vector));
            doc_vectors.insert(doc_id, vector);
        }

        Ok(VectorSpaceModel {
            index,
            doc_vectors,
            doc_magnitudes,
        })
    }

    /// TF-IDF weight of a term in a document: `(count / length) * idf`.
    pub fn tfidf(&self, term: &str, doc_id: DocId) -> f64 {
        let count = self.index.term_count_in_doc(term, doc_id);
        if count == 0 {
            return 0.0;
        }
        let length = self.index.doc_length(doc_id);
        tf(count, length) * self.index.idf(term)
    }

    fn compute_document_vector(index: &InvertedIndex, doc_id: DocId) -> TermVector {
        let mut vector = TermVector::new();
        let length = index.doc_length(doc_id);

        if let Some(term_counts) = index.doc_term_counts(doc_id) {
            for (term, &count) in term_counts {
                let weight = tf(count, length) * index.idf(term);
                if weight != 0.0 {
                    vector.insert(term.clone(), weight);
                }
            }
        }

        vector
    }

    /// The precomputed TF-IDF vector for a document, empty if unknown.
    pub fn document_vector(&self, doc_id: DocId) -> TermVector {
        self.doc_vectors.get(&doc_id).cloned().unwrap_or_default()
    }

    /// Build the TF-IDF vector for a query.
    ///
    /// Query term frequencies are divided by the full preprocessed query
    /// length (out-of-vocabulary occurrences included), then weighted by the
    /// collection IDF. Out-of-vocabulary terms are dropped silently.
    pub fn query_vector(&self, query: &str) -> Result<TermVector> {
        let terms = self.index.analyzer().preprocess(query)?;
        let query_length = terms.len() as u32;

        let mut term_freqs: AHashMap<String, u32> = AHashMap::new();
        for term in terms {
            *term_freqs.entry(term).or_insert(0) += 1;
        }

        let mut vector = TermVector::new();
        for (term, freq) in term_freqs {
            if !self.index.term_exists(&term) {
                continue;
            }
            let weight = tf(freq, query_length) * self.index.idf(&term);
            if weight != 0.0 {
                vector.insert(term, weight);
            }
        }

        Ok(vector)
    }

    /// Cosine similarity between two sparse vectors.
    ///
    /// The dot product runs over the key intersection; each magnitude is the
    /// L2 norm over that vector's own entries. Returns 0.0 if either
    /// magnitude is zero or the intersection is empty.
    pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
        // Iterate the smaller map when intersecting.
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

        let mut dot = 0.0;
        for (term, &weight) in small {
            if let Some(&other) = large.get(term) {
                dot += weight * other;
            }
        }

        if dot == 0.0 {
            return 0.0;
        }

        let mag_a = magnitude(a);
        let mag_b = magnitude(b);
        if mag_a == 0.0 || mag_b == 0.0 {
            return 0.0;
        }

        dot / (mag_a * mag_b)
    }

    fn similarity_to_doc(&self, query_vector: &TermVector, query_magnitude: f64, doc_id: DocId) -> f64 {
        let Some(doc_vector) = self.doc_vectors.get(&doc_id) else {
            return 0.0;
        };

        let mut dot = 0.0;
        for (term, &weight) in query_vector {
            if let Some(&doc_weight) = doc_vector.get(term) {
                dot += weight * doc_weight;
            }
        }

        if dot == 0.0 {
            return 0.0;
        }

        let doc_magnitude = self.doc_magnitudes.get(&doc_id).copied().unwrap_or(0.0);
        if query_magnitude == 0.0 || doc_magnitude == 0.0 {
            return 0.0;
        }

        dot / (query_magnitude * doc_magnitude)
    }
}

impl RetrievalModel for VectorSpaceModel {
    /// Score every document against the query and return the `top_k` best.
    ///
    /// Documents with similarity exactly zero are discarded before ranking
    /// and never appear in the output.
    fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDoc>> {
        let query_vector = self.query_vector(query)?;
        if query_vector.is_empty() {
            return Ok(Vec::new());
        }
        let query_magnitude = magnitude(&query_vector);

        let mut scored = Vec::new();
        for &doc_id in self.index.doc_ids() {
            let similarity = self.similarity_to_doc(&query_vector, query_magnitude, doc_id);
            if similarity > 0.0 {
                scored.push(ScoredDoc {
                    doc_id,
                    score: similarity,
                });
            }
        }

        self.index.observer().on_query_scored(self.name(), scored.len());

        Ok(rank_results(scored, top_k))
    }

    fn name(&self) -> &'static str {
        "vsm"
    }
}

/// Raw term-frequency proportion: `count / length`, 0.0 for empty lengths.
fn tf(count: u32, length: u32) -> f64 {
    if length == 0 {
        return 0.0;
    }
    f64::from(count) / f64::from(length)
}

/// L2 norm over a sparse vector's entries.
fn magnitude(vector: &TermVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
    use crate::analysis::tokenizer::WhitespaceTokenizer;
    use std::collections::BTreeMap;

    fn plain_analyzer() -> Arc<dyn Analyzer> {
        Arc::new(PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new())))
    }

    fn build_index(docs: &[(DocId, &str)]) -> Arc<InvertedIndex> {
        let documents: BTreeMap<DocId, String> =
            docs.iter().map(|&(id, text)| (id, text.to_string())).collect();
        let mut index = InvertedIndex::new(plain_analyzer());
        index.build(&documents).unwrap();
        Arc::new(index)
    }

    #[test]
    fn test_requires_built_index() {
        let index = Arc::new(InvertedIndex::new(plain_analyzer()));
        assert!(VectorSpaceModel::new(index).is_err());
    }

    #[test]
    fn test_tf_proportion_round_trip() {
        // "cat" appears 2 times out of 4 terms; idf = ln(2/1).
        let index = build_index(&[(1, "cat cat dog mouse"), (2, "dog mouse bird crow")]);
        let model = VectorSpaceModel::new(Arc::clone(&index)).unwrap();

        assert_eq!(index.term_count_in_doc("cat", 1), 2);
        let expected = (2.0 / 4.0) * 2.0_f64.ln();
        assert!((model.tfidf("cat", 1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_document_vector_is_sparse_and_nonzero() {
        // "the" occurs in both documents, so its idf and weight are zero and
        // it must not be materialized.
        let index = build_index(&[(1, "the cat"), (2, "the dog")]);
        let model = VectorSpaceModel::new(index).unwrap();

        let vector = model.document_vector(1);
        assert_eq!(vector.len(), 1);
        assert!(vector.contains_key("cat"));
        assert!(vector.values().all(|&w| w != 0.0));
    }

    #[test]
    fn test_query_vector_drops_oov_terms() {
        let index = build_index(&[(1, "cat dog"), (2, "dog bird")]);
        let model = VectorSpaceModel::new(index).unwrap();

        let vector = model.query_vector("cat zebra").unwrap();
        assert_eq!(vector.len(), 1);
        assert!(vector.contains_key("cat"));
    }

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let mut v = TermVector::new();
        v.insert("cat".to_string(), 0.4);
        v.insert("dog".to_string(), 0.3);

        assert!((VectorSpaceModel::cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_disjoint_vectors() {
        let mut a = TermVector::new();
        a.insert("cat".to_string(), 0.4);
        let mut b = TermVector::new();
        b.insert("dog".to_string(), 0.7);

        assert_eq!(VectorSpaceModel::cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_empty_vector() {
        let empty = TermVector::new();
        let mut v = TermVector::new();
        v.insert("cat".to_string(), 0.4);

        assert_eq!(VectorSpaceModel::cosine_similarity(&empty, &v), 0.0);
    }

    #[test]
    fn test_retrieve_excludes_zero_similarity_documents() {
        // Document 3 shares no terms with the query and must never appear,
        // even with top_k far larger than the collection.
        let index = build_index(&[(1, "cat dog"), (2, "cat bird"), (3, "iron steel")]);
        let model = VectorSpaceModel::new(index).unwrap();

        let results = model.retrieve("cat", 100).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|d| d.doc_id != 3));
        assert!(results.iter().all(|d| d.score > 0.0));
    }

    #[test]
    fn test_retrieve_empty_query() {
        let index = build_index(&[(1, "cat dog")]);
        let model = VectorSpaceModel::new(index).unwrap();

        assert!(model.retrieve("", 10).unwrap().is_empty());
        assert!(model.retrieve("zebra quartz", 10).unwrap().is_empty());
    }

    #[test]
    fn test_retrieve_ranks_more_focused_documents_higher() {
        let index = build_index(&[
            (1, "cat cat cat cat"),
            (2, "cat dog bird mouse"),
            (3, "dog dog dog dog"),
        ]);
        let model = VectorSpaceModel::new(index).unwrap();

        let results = model.retrieve("cat", 10).unwrap();
        assert_eq!(results[0].doc_id, 1);
        assert!(results[0].score > results[1].score);
        assert_eq!(results[1].doc_id, 2);
    }

    #[test]
    fn test_retrieve_tie_break_by_doc_id() {
        // Identical documents score identically; ties resolve by id.
        let index = build_index(&[(4, "cat dog"), (2, "cat dog"), (9, "cat dog"), (7, "iron ore")]);
        let model = VectorSpaceModel::new(index).unwrap();

        let results = model.retrieve("cat dog", 10).unwrap();
        let ids: Vec<DocId> = results.iter().map(|d| d.doc_id).collect();
        assert_eq!(ids, vec![2, 4, 9]);
    }

    #[test]
    fn test_retrieve_truncates_to_top_k() {
        let index = build_index(&[(1, "cat a"), (2, "cat b"), (3, "cat c")]);
        let model = VectorSpaceModel::new(index).unwrap();

        let results = model.retrieve("cat", 2).unwrap();
        assert_eq!(results.len(), 2);
    }
}
