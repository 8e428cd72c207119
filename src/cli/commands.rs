//! Command implementations for the ranklab CLI.

use std::sync::Arc;
use std::time::Instant;

use crate::analysis::analyzer::{Analyzer, standard_analyzer_with};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::CranfieldCollection;
use crate::error::{RanklabError, Result};
use crate::evaluation::{Evaluator, RankedResults};
use crate::index::InvertedIndex;
use crate::retrieval::{RetrievalModel, UnigramLanguageModel, VectorSpaceModel};

/// Execute a CLI command.
pub fn execute_command(args: RanklabArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::Evaluate(eval_args) => evaluate(eval_args.clone(), &args),
    }
}

fn build_analyzer(analysis: &AnalysisArgs) -> Arc<dyn Analyzer> {
    standard_analyzer_with(analysis.stemming_enabled(), analysis.stop_words_enabled())
}

fn load_and_index(
    data_dir: &std::path::Path,
    analysis: &AnalysisArgs,
    cli_args: &RanklabArgs,
) -> Result<(CranfieldCollection, Arc<InvertedIndex>)> {
    if cli_args.verbosity() > 1 {
        println!("Loading collection from: {}", data_dir.display());
    }

    let collection = CranfieldCollection::load(data_dir)?;
    let mut index = InvertedIndex::new(build_analyzer(analysis));
    index.build(&collection.documents)?;

    if cli_args.verbosity() > 1 {
        let stats = index.stats();
        println!(
            "Indexed {} documents, {} unique terms",
            stats.num_docs, stats.vocabulary_size
        );
    }

    Ok((collection, Arc::new(index)))
}

fn build_model(
    choice: ModelChoice,
    index: Arc<InvertedIndex>,
    mu: f64,
) -> Result<Box<dyn RetrievalModel>> {
    match choice {
        ModelChoice::Vsm => Ok(Box::new(VectorSpaceModel::new(index)?)),
        ModelChoice::Lm => Ok(Box::new(UnigramLanguageModel::with_mu(index, mu)?)),
        ModelChoice::Both => Err(RanklabError::invalid_argument(
            "search requires a single model, use --model vsm or --model lm",
        )),
    }
}

/// Run one query and print the ranked results.
fn search(args: SearchArgs, cli_args: &RanklabArgs) -> Result<()> {
    let (collection, index) = load_and_index(&args.data_dir, &args.analysis, cli_args)?;
    let model = build_model(args.model, index, args.mu)?;

    let start = Instant::now();
    let ranked = model.retrieve(&args.query, args.limit)?;
    let duration = start.elapsed();

    let hits = ranked
        .iter()
        .enumerate()
        .map(|(i, doc)| SearchHit {
            rank: i + 1,
            doc_id: doc.doc_id,
            score: doc.score,
            snippet: snippet(collection.documents.get(&doc.doc_id), 100),
        })
        .collect();

    output_result(
        &SearchResults {
            model: model.name().to_string(),
            query: args.query,
            hits,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Show index and collection statistics.
fn show_stats(args: StatsArgs, cli_args: &RanklabArgs) -> Result<()> {
    let (collection, index) = load_and_index(&args.data_dir, &args.analysis, cli_args)?;

    let num_judged_queries = collection
        .judgments
        .values()
        .filter(|relevant| !relevant.is_empty())
        .count();

    output_result(
        &CollectionStats {
            num_queries: collection.queries.len(),
            num_judged_queries,
            index: index.stats(),
        },
        cli_args,
    )
}

/// Evaluate one or both models over the full query set.
fn evaluate(args: EvaluateArgs, cli_args: &RanklabArgs) -> Result<()> {
    let (collection, index) = load_and_index(&args.data_dir, &args.analysis, cli_args)?;

    let models: Vec<Box<dyn RetrievalModel>> = match args.model {
        ModelChoice::Vsm => vec![Box::new(VectorSpaceModel::new(index)?)],
        ModelChoice::Lm => vec![Box::new(UnigramLanguageModel::with_mu(index, args.mu)?)],
        ModelChoice::Both => vec![
            Box::new(VectorSpaceModel::new(Arc::clone(&index))?),
            Box::new(UnigramLanguageModel::with_mu(index, args.mu)?),
        ],
    };

    let evaluator = Evaluator::new(args.k_values.clone());
    let start = Instant::now();
    let mut reports = Vec::with_capacity(models.len());

    for model in &models {
        if cli_args.verbosity() > 1 {
            println!("Running {} on {} queries...", model.name(), collection.queries.len());
        }

        let mut results = RankedResults::new();
        for (&query_id, query_text) in &collection.queries {
            results.insert(query_id, model.retrieve(query_text, args.top_k)?);
        }

        let mut report = evaluator.evaluate(model.name(), &collection.judgments, &results);
        if !args.per_query {
            report.per_query.clear();
        }
        reports.push(report);
    }

    let duration = start.elapsed();

    output_result(
        &EvaluationResults {
            reports,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// A short text preview truncated on a character boundary.
fn snippet(text: Option<&String>, max_chars: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.chars().count() <= max_chars {
        text.clone()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
