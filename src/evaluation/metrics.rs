//! Standard information-retrieval metrics.
//!
//! All functions operate on binary relevance: a set of relevant document ids
//! and a ranked list already sorted best-first. Every degenerate input
//! (`K = 0`, empty relevant set, empty ranked list) has a defined zero
//! result; none of these functions can fail.
//!
//! Conventions worth noting:
//!
//! - Precision@K always divides by K, even when the ranked list is shorter.
//! - Average precision divides by the total number of relevant documents,
//!   not by the number of hits found in the list.
//! - IDCG@K assumes `min(|relevant|, K)` relevant documents occupy the top
//!   ranks.

use std::collections::BTreeSet;

use crate::index::DocId;
use crate::retrieval::ScoredDoc;

/// Precision at cutoff K: `|relevant ∩ top-K| / K`.
///
/// The denominator is exactly K even when fewer than K documents were
/// retrieved. Returns 0.0 when K is 0.
pub fn precision_at_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    hits_in_top_k(relevant, ranked, k) as f64 / k as f64
}

/// Recall at cutoff K: `|relevant ∩ top-K| / |relevant|`.
///
/// Returns 0.0 when the relevant set is empty.
pub fn recall_at_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    hits_in_top_k(relevant, ranked, k) as f64 / relevant.len() as f64
}

/// F1 at cutoff K: harmonic mean of precision@K and recall@K.
///
/// Returns 0.0 when both are zero.
pub fn f1_at_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> f64 {
    let precision = precision_at_k(relevant, ranked, k);
    let recall = recall_at_k(relevant, ranked, k);
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Average precision over the full ranked list.
///
/// The mean of precision-at-rank at every rank holding a relevant document,
/// divided by the total number of relevant documents. Returns 0.0 when the
/// relevant set is empty.
pub fn average_precision(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc]) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let mut hits = 0u32;
    let mut sum = 0.0;
    for (i, doc) in ranked.iter().enumerate() {
        if relevant.contains(&doc.doc_id) {
            hits += 1;
            sum += f64::from(hits) / (i + 1) as f64;
        }
    }

    sum / relevant.len() as f64
}

/// Discounted cumulative gain at cutoff K, with binary gains and the
/// `log2(rank + 1)` discount, rank 1-indexed.
pub fn dcg_at_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> f64 {
    let mut dcg = 0.0;
    for (i, doc) in ranked.iter().take(k).enumerate() {
        if relevant.contains(&doc.doc_id) {
            dcg += 1.0 / ((i + 2) as f64).log2();
        }
    }
    dcg
}

/// Ideal DCG at cutoff K: `min(|relevant|, K)` relevant documents occupying
/// ranks 1 and onward. Returns 0.0 when the relevant set is empty.
pub fn idcg_at_k(relevant: &BTreeSet<DocId>, k: usize) -> f64 {
    let ideal_hits = relevant.len().min(k);
    (0..ideal_hits).map(|i| 1.0 / ((i + 2) as f64).log2()).sum()
}

/// Normalized DCG at cutoff K: `DCG@K / IDCG@K`, 0.0 when IDCG is zero.
pub fn ndcg_at_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> f64 {
    let idcg = idcg_at_k(relevant, k);
    if idcg == 0.0 {
        return 0.0;
    }
    dcg_at_k(relevant, ranked, k) / idcg
}

/// Reciprocal rank of the first relevant document in the full ranked list,
/// 0.0 when no relevant document is retrieved.
pub fn reciprocal_rank(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc]) -> f64 {
    for (i, doc) in ranked.iter().enumerate() {
        if relevant.contains(&doc.doc_id) {
            return 1.0 / (i + 1) as f64;
        }
    }
    0.0
}

/// R-precision: precision at rank R where R is the number of relevant
/// documents. Returns 0.0 when the relevant set is empty.
pub fn r_precision(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc]) -> f64 {
    precision_at_k(relevant, ranked, relevant.len())
}

/// Expected reciprocal rank at cutoff K under the cascade model.
///
/// A continuation probability starts at 1; each relevant document at rank r
/// contributes `p / r` and stops the cascade (binary grades make the
/// stopping deterministic). Returns 0.0 when K is 0 or the list is empty.
pub fn err_at_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> f64 {
    let mut err = 0.0;
    let mut continuation = 1.0;

    for (i, doc) in ranked.iter().take(k).enumerate() {
        let grade = if relevant.contains(&doc.doc_id) { 1.0 } else { 0.0 };
        err += continuation * grade / (i + 1) as f64;
        continuation *= 1.0 - grade;
    }

    err
}

fn hits_in_top_k(relevant: &BTreeSet<DocId>, ranked: &[ScoredDoc], k: usize) -> usize {
    ranked
        .iter()
        .take(k)
        .filter(|doc| relevant.contains(&doc.doc_id))
        .count()
}
