//! Evaluation of ranked retrieval results against relevance judgments.
//!
//! [`metrics`] holds the individual metric formulas; the [`Evaluator`]
//! applies them per query and aggregates across a run. Judgments are binary:
//! a query maps to the set of document ids judged relevant.
//!
//! Aggregates (MAP, MRR, mean P@K and friends) average only over queries
//! that appear in the judgment mapping with a non-empty relevant set.
//! Unjudged queries are excluded entirely, never counted as zero. A judged
//! query with no retrieval results is scored against an empty ranked list.

pub mod metrics;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::index::DocId;
use crate::retrieval::ScoredDoc;

/// Query identifier.
pub type QueryId = u32;

/// Relevance judgments: query id to the set of relevant document ids.
pub type Judgments = BTreeMap<QueryId, BTreeSet<DocId>>;

/// Ranked results per query, as produced by a retrieval model.
pub type RankedResults = BTreeMap<QueryId, Vec<ScoredDoc>>;

/// Cutoff-dependent metrics at a single K.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsAtK {
    /// The cutoff.
    pub k: usize,
    /// Precision@K.
    pub precision: f64,
    /// Recall@K.
    pub recall: f64,
    /// F1@K.
    pub f1: f64,
    /// nDCG@K.
    pub ndcg: f64,
    /// ERR@K.
    pub err: f64,
}

/// Metrics for a single judged query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMetrics {
    /// The query these metrics belong to.
    pub query_id: QueryId,
    /// Average precision over the full ranked list.
    pub average_precision: f64,
    /// Reciprocal rank of the first relevant hit.
    pub reciprocal_rank: f64,
    /// Precision at rank R = number of relevant documents.
    pub r_precision: f64,
    /// Cutoff metrics, one entry per configured K.
    pub at_k: Vec<MetricsAtK>,
}

/// Mean metrics across all judged queries of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    /// Number of queries that qualified for aggregation.
    pub num_queries: usize,
    /// Mean average precision.
    pub map: f64,
    /// Mean reciprocal rank.
    pub mrr: f64,
    /// Mean R-precision.
    pub mean_r_precision: f64,
    /// Mean cutoff metrics, one entry per configured K.
    pub at_k: Vec<MetricsAtK>,
}

/// Full evaluation of one retrieval run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Name of the model that produced the run.
    pub model: String,
    /// Per-query metrics, in query id order.
    pub per_query: Vec<QueryMetrics>,
    /// Means over all judged queries.
    pub aggregate: AggregateMetrics,
}

/// Evaluator configured with the cutoffs to report.
#[derive(Debug, Clone)]
pub struct Evaluator {
    k_values: Vec<usize>,
}

impl Default for Evaluator {
    /// The conventional reporting depths for small test collections.
    fn default() -> Self {
        Evaluator::new(vec![5, 10])
    }
}

impl Evaluator {
    /// Create an evaluator reporting at the given cutoffs.
    pub fn new(k_values: Vec<usize>) -> Self {
        Evaluator { k_values }
    }

    /// The configured cutoffs.
    pub fn k_values(&self) -> &[usize] {
        &self.k_values
    }

    /// Compute all metrics for one query.
    pub fn evaluate_query(
        &self,
        query_id: QueryId,
        relevant: &BTreeSet<DocId>,
        ranked: &[ScoredDoc],
    ) -> QueryMetrics {
        let at_k = self
            .k_values
            .iter()
            .map(|&k| MetricsAtK {
                k,
                precision: metrics::precision_at_k(relevant, ranked, k),
                recall: metrics::recall_at_k(relevant, ranked, k),
                f1: metrics::f1_at_k(relevant, ranked, k),
                ndcg: metrics::ndcg_at_k(relevant, ranked, k),
                err: metrics::err_at_k(relevant, ranked, k),
            })
            .collect();

        QueryMetrics {
            query_id,
            average_precision: metrics::average_precision(relevant, ranked),
            reciprocal_rank: metrics::reciprocal_rank(relevant, ranked),
            r_precision: metrics::r_precision(relevant, ranked),
            at_k,
        }
    }

    /// Evaluate a full run against the judgments.
    ///
    /// Only queries present in `judgments` with a non-empty relevant set
    /// contribute. A qualifying query missing from `results` is evaluated
    /// against an empty ranked list.
    pub fn evaluate(
        &self,
        model: &str,
        judgments: &Judgments,
        results: &RankedResults,
    ) -> EvaluationReport {
        let empty: Vec<ScoredDoc> = Vec::new();
        let mut per_query = Vec::new();

        for (&query_id, relevant) in judgments {
            if relevant.is_empty() {
                continue;
            }
            let ranked = results.get(&query_id).unwrap_or(&empty);
            per_query.push(self.evaluate_query(query_id, relevant, ranked));
        }

        let aggregate = self.aggregate(&per_query);

        EvaluationReport {
            model: model.to_string(),
            per_query,
            aggregate,
        }
    }

    /// Average per-query metrics. Zero queries yield all-zero aggregates.
    fn aggregate(&self, per_query: &[QueryMetrics]) -> AggregateMetrics {
        let n = per_query.len();
        let mean = |extract: &dyn Fn(&QueryMetrics) -> f64| -> f64 {
            if n == 0 {
                0.0
            } else {
                per_query.iter().map(extract).sum::<f64>() / n as f64
            }
        };

        let at_k = self
            .k_values
            .iter()
            .enumerate()
            .map(|(i, &k)| MetricsAtK {
                k,
                precision: mean(&|q| q.at_k[i].precision),
                recall: mean(&|q| q.at_k[i].recall),
                f1: mean(&|q| q.at_k[i].f1),
                ndcg: mean(&|q| q.at_k[i].ndcg),
                err: mean(&|q| q.at_k[i].err),
            })
            .collect();

        AggregateMetrics {
            num_queries: n,
            map: mean(&|q| q.average_precision),
            mrr: mean(&|q| q.reciprocal_rank),
            mean_r_precision: mean(&|q| q.r_precision),
            at_k,
        }
    }
}
