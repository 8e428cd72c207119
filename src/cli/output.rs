//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, RanklabArgs};
use crate::error::Result;
use crate::evaluation::EvaluationReport;
use crate::index::IndexStats;

/// One hit in a search result listing.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub doc_id: u32,
    pub score: f64,
    pub snippet: String,
}

/// Result structure for the search command.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub model: String,
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub duration_ms: u64,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize)]
pub struct CollectionStats {
    pub num_queries: usize,
    pub num_judged_queries: usize,
    pub index: IndexStats,
}

/// Result structure for the evaluate command.
#[derive(Debug, Serialize)]
pub struct EvaluationResults {
    pub reports: Vec<EvaluationReport>,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanDisplay>(result: &T, args: &RanklabArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &RanklabArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Human-readable rendering for command results.
pub trait HumanDisplay {
    fn print_human(&self, args: &RanklabArgs);
}

impl HumanDisplay for SearchResults {
    fn print_human(&self, args: &RanklabArgs) {
        if args.verbosity() > 0 {
            println!("Search Results ({}):", self.model);
            println!("═══════════════");
            println!();
        }

        for hit in &self.hits {
            println!(
                "{:3}. Doc {:5}  (score: {:10.4})",
                hit.rank, hit.doc_id, hit.score
            );
            if !hit.snippet.is_empty() {
                println!("     {}", hit.snippet);
            }
        }

        if args.verbosity() > 0 {
            println!();
            println!("Total hits: {}", self.hits.len());
            println!("Search time: {}ms", self.duration_ms);
        }
    }
}

impl HumanDisplay for CollectionStats {
    fn print_human(&self, _args: &RanklabArgs) {
        println!("Collection Statistics:");
        println!("═════════════════════");
        println!("Documents:           {}", self.index.num_docs);
        println!("Queries:             {}", self.num_queries);
        println!("Judged queries:      {}", self.num_judged_queries);
        println!("Vocabulary size:     {}", self.index.vocabulary_size);
        println!("Total terms:         {}", self.index.total_terms);
        println!("Total postings:      {}", self.index.total_postings);
        println!("Avg document length: {:.1}", self.index.avg_doc_length);
    }
}

impl HumanDisplay for EvaluationResults {
    fn print_human(&self, args: &RanklabArgs) {
        for report in &self.reports {
            print_report_human(report, args);
        }

        if self.reports.len() == 2 {
            print_comparison_human(&self.reports[0], &self.reports[1]);
        }

        if args.verbosity() > 0 {
            println!();
            println!("Evaluation time: {}ms", self.duration_ms);
        }
    }
}

fn print_report_human(report: &EvaluationReport, args: &RanklabArgs) {
    let agg = &report.aggregate;

    println!();
    println!("Model: {}", report.model);
    println!("══════════════════════════════");
    println!("Queries evaluated: {}", agg.num_queries);
    println!();
    println!("Core Metrics:");
    println!("  MAP:          {:.4}", agg.map);
    println!("  MRR:          {:.4}", agg.mrr);
    println!("  R-Precision:  {:.4}", agg.mean_r_precision);

    for at_k in &agg.at_k {
        println!();
        println!("Metrics @ K={}:", at_k.k);
        println!("  Precision@{}:  {:.4}", at_k.k, at_k.precision);
        println!("  Recall@{}:     {:.4}", at_k.k, at_k.recall);
        println!("  F1@{}:         {:.4}", at_k.k, at_k.f1);
        println!("  nDCG@{}:       {:.4}", at_k.k, at_k.ndcg);
        println!("  ERR@{}:        {:.4}", at_k.k, at_k.err);
    }

    if args.verbosity() > 1 {
        println!();
        println!("Per-query AP:");
        for query in &report.per_query {
            println!(
                "  Query {:4}: AP={:.4} RR={:.4}",
                query.query_id, query.average_precision, query.reciprocal_rank
            );
        }
    }
}

fn print_comparison_human(a: &EvaluationReport, b: &EvaluationReport) {
    println!();
    println!("Comparison (by MAP):");
    println!("────────────────────");
    println!("  {}: {:.4}", a.model, a.aggregate.map);
    println!("  {}: {:.4}", b.model, b.aggregate.map);

    let (winner, better, worse) = if a.aggregate.map > b.aggregate.map {
        (&a.model, a.aggregate.map, b.aggregate.map)
    } else if b.aggregate.map > a.aggregate.map {
        (&b.model, b.aggregate.map, a.aggregate.map)
    } else {
        println!("  Result: tie");
        return;
    };

    if worse > 0.0 {
        let pct = (better - worse) / worse * 100.0;
        println!("  Winner: {winner} (+{pct:.2}%)");
    } else {
        println!("  Winner: {winner}");
    }
}
