//! The inverted index implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use serde::Serialize;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::index::observer::{NoopObserver, ProgressObserver};

/// Document identifier.
pub type DocId = u32;

/// A single posting: a document and the term's frequency within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Posting {
    /// The document containing the term.
    pub doc_id: DocId,

    /// Number of occurrences of the term in that document.
    pub term_freq: u32,
}

/// Summary statistics about a built index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    /// Number of documents indexed.
    pub num_docs: usize,

    /// Number of unique terms.
    pub vocabulary_size: usize,

    /// Total number of term occurrences across the collection.
    pub total_terms: u64,

    /// Total number of postings across all terms.
    pub total_postings: usize,

    /// Average document length in terms.
    pub avg_doc_length: f64,
}

/// An inverted index over a document collection.
///
/// Built once from a document mapping via [`build`](InvertedIndex::build) and
/// read-only afterwards. Every read operation is total: unseen terms and
/// unknown documents yield zero or empty defaults.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use ranklab::analysis::analyzer::standard_analyzer;
/// use ranklab::index::InvertedIndex;
///
/// let mut documents = BTreeMap::new();
/// documents.insert(1, "experimental heating study".to_string());
/// documents.insert(2, "heating of boundary layers".to_string());
///
/// let mut index = InvertedIndex::new(standard_analyzer());
/// index.build(&documents).unwrap();
///
/// assert_eq!(index.num_docs(), 2);
/// assert_eq!(index.doc_freq("heat"), 2);
/// assert_eq!(index.idf("heat"), 0.0);
/// ```
pub struct InvertedIndex {
    /// Analyzer shared with every consumer of this index.
    analyzer: Arc<dyn Analyzer>,

    /// Observer notified at build milestones.
    observer: Arc<dyn ProgressObserver>,

    /// term -> postings, in document processing order.
    postings: AHashMap<String, Vec<Posting>>,

    /// doc -> term -> frequency.
    doc_term_counts: AHashMap<DocId, AHashMap<String, u32>>,

    /// doc -> total number of terms.
    doc_lengths: AHashMap<DocId, u32>,

    /// term -> number of documents containing it.
    doc_freq: AHashMap<String, u32>,

    /// term -> ln(N / df).
    idf: AHashMap<String, f64>,

    /// term -> total occurrences across the collection.
    collection_term_counts: AHashMap<String, u64>,

    /// All document ids, ascending. Fixes the scan order for retrieval.
    doc_ids: Vec<DocId>,

    /// Total term occurrences across the collection.
    total_terms: u64,

    /// Average document length in terms (0 for an empty collection).
    avg_doc_length: f64,

    /// Whether `build` has completed at least once.
    built: bool,
}

impl std::fmt::Debug for InvertedIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvertedIndex")
            .field("num_docs", &self.doc_ids.len())
            .field("vocabulary_size", &self.postings.len())
            .field("total_terms", &self.total_terms)
            .field("built", &self.built)
            .finish()
    }
}

impl InvertedIndex {
    /// Create an empty index using the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        InvertedIndex {
            analyzer,
            observer: Arc::new(NoopObserver),
            postings: AHashMap::new(),
            doc_term_counts: AHashMap::new(),
            doc_lengths: AHashMap::new(),
            doc_freq: AHashMap::new(),
            idf: AHashMap::new(),
            collection_term_counts: AHashMap::new(),
            doc_ids: Vec::new(),
            total_terms: 0,
            avg_doc_length: 0.0,
            built: false,
        }
    }

    /// Attach a progress observer, replacing the default no-op one.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build the index from a document mapping.
    ///
    /// Documents are processed in ascending id order. Any state from a
    /// previous build is discarded first, so rebuilding from the same mapping
    /// is idempotent.
    pub fn build(&mut self, documents: &BTreeMap<DocId, String>) -> Result<()> {
        self.clear();
        self.observer.on_build_started(documents.len());

        for (&doc_id, text) in documents {
            let terms = self.analyzer.preprocess(text)?;

            let mut term_counts: AHashMap<String, u32> = AHashMap::new();
            for term in &terms {
                *term_counts.entry(term.clone()).or_insert(0) += 1;
            }

            let doc_length = terms.len() as u32;
            self.doc_lengths.insert(doc_id, doc_length);
            self.total_terms += u64::from(doc_length);
            self.doc_ids.push(doc_id);

            for (term, count) in &term_counts {
                *self
                    .collection_term_counts
                    .entry(term.clone())
                    .or_insert(0) += u64::from(*count);
                self.postings.entry(term.clone()).or_default().push(Posting {
                    doc_id,
                    term_freq: *count,
                });
            }

            self.doc_term_counts.insert(doc_id, term_counts);
        }

        let num_docs = self.doc_ids.len();

        for (term, postings) in &self.postings {
            self.doc_freq.insert(term.clone(), postings.len() as u32);
        }

        self.avg_doc_length = if num_docs > 0 {
            self.total_terms as f64 / num_docs as f64
        } else {
            0.0
        };

        self.compute_idf(num_docs);
        self.built = true;

        let stats = self.stats();
        self.observer.on_build_finished(&stats);

        Ok(())
    }

    /// Discard all index state.
    fn clear(&mut self) {
        self.postings.clear();
        self.doc_term_counts.clear();
        self.doc_lengths.clear();
        self.doc_freq.clear();
        self.idf.clear();
        self.collection_term_counts.clear();
        self.doc_ids.clear();
        self.total_terms = 0;
        self.avg_doc_length = 0.0;
        self.built = false;
    }

    /// idf(t) = ln(N / df(t)), defined for df >= 1.
    fn compute_idf(&mut self, num_docs: usize) {
        let n = num_docs as f64;
        for (term, &df) in &self.doc_freq {
            let idf = if df > 0 { (n / f64::from(df)).ln() } else { 0.0 };
            self.idf.insert(term.clone(), idf);
        }
    }

    /// The analyzer this index was built with.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// The progress observer attached to this index.
    pub fn observer(&self) -> &Arc<dyn ProgressObserver> {
        &self.observer
    }

    /// Whether `build` has completed.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Postings list for a term, empty if the term is unseen.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of documents containing a term, 0 if unseen.
    pub fn doc_freq(&self, term: &str) -> u32 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Inverse document frequency of a term, 0.0 if unseen.
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Occurrences of a term within a document, 0 if absent.
    pub fn term_count_in_doc(&self, term: &str, doc_id: DocId) -> u32 {
        self.doc_term_counts
            .get(&doc_id)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Term-frequency table for a document, if it exists.
    pub fn doc_term_counts(&self, doc_id: DocId) -> Option<&AHashMap<String, u32>> {
        self.doc_term_counts.get(&doc_id)
    }

    /// Length of a document in terms, 0 if unknown.
    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    /// Total occurrences of a term across the collection, 0 if unseen.
    pub fn collection_term_count(&self, term: &str) -> u64 {
        self.collection_term_counts.get(term).copied().unwrap_or(0)
    }

    /// Probability of a term under the collection model, 0.0 when the
    /// collection is empty or the term is unseen.
    pub fn collection_prob(&self, term: &str) -> f64 {
        if self.total_terms == 0 {
            return 0.0;
        }
        self.collection_term_count(term) as f64 / self.total_terms as f64
    }

    /// Whether a term occurs anywhere in the collection.
    pub fn term_exists(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// Ids of documents containing a term, in processing order.
    pub fn documents_containing_term(&self, term: &str) -> Vec<DocId> {
        self.postings(term).iter().map(|p| p.doc_id).collect()
    }

    /// All document ids, ascending.
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Number of documents in the collection.
    pub fn num_docs(&self) -> usize {
        self.doc_ids.len()
    }

    /// Number of unique terms.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    /// Total term occurrences across the collection.
    pub fn total_terms(&self) -> u64 {
        self.total_terms
    }

    /// Average document length in terms, 0.0 for an empty collection.
    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }

    /// Summary statistics for this index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.num_docs(),
            vocabulary_size: self.vocabulary_size(),
            total_terms: self.total_terms,
            total_postings: self.postings.values().map(Vec::len).sum(),
            avg_doc_length: self.avg_doc_length,
        }
    }
}
