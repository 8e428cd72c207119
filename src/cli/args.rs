//! Command line argument parsing for the ranklab CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::retrieval::language_model::DEFAULT_MU;

/// Ranklab - ranked retrieval models and evaluation for the Cranfield collection
#[derive(Parser, Debug, Clone)]
#[command(name = "ranklab")]
#[command(about = "Ranked retrieval models and IR evaluation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RanklabArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RanklabArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a single query against a retrieval model
    Search(SearchArgs),

    /// Show statistics of the index built over a collection
    Stats(StatsArgs),

    /// Evaluate retrieval models against the relevance judgments
    Evaluate(EvaluateArgs),
}

/// Text analysis options shared by all commands.
#[derive(Parser, Debug, Clone)]
pub struct AnalysisArgs {
    /// Disable stemming
    #[arg(long)]
    pub no_stemming: bool,

    /// Disable stop word removal
    #[arg(long)]
    pub no_stop_words: bool,
}

impl AnalysisArgs {
    /// Check if stemming is enabled
    pub fn stemming_enabled(&self) -> bool {
        !self.no_stemming
    }

    /// Check if stop word removal is enabled
    pub fn stop_words_enabled(&self) -> bool {
        !self.no_stop_words
    }
}

/// Arguments for running a single query
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Path to the collection data directory
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Retrieval model to use
    #[arg(short = 'm', long, default_value = "vsm")]
    pub model: ModelChoice,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Dirichlet smoothing strength (language model only)
    #[arg(long, default_value_t = DEFAULT_MU)]
    pub mu: f64,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the collection data directory
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for evaluation runs
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to the collection data directory
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Retrieval model to evaluate
    #[arg(short = 'm', long, default_value = "both")]
    pub model: ModelChoice,

    /// Ranking depth per query
    #[arg(long, default_value = "100")]
    pub top_k: usize,

    /// Cutoffs to report (comma-separated)
    #[arg(short = 'k', long = "k-values", value_delimiter = ',', default_values_t = vec![5, 10])]
    pub k_values: Vec<usize>,

    /// Dirichlet smoothing strength (language model only)
    #[arg(long, default_value_t = DEFAULT_MU)]
    pub mu: f64,

    /// Include per-query metrics in the output
    #[arg(long)]
    pub per_query: bool,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Retrieval models selectable from the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    /// TF-IDF vector space model
    Vsm,
    /// Dirichlet-smoothed unigram language model
    Lm,
    /// Both models (evaluate only)
    Both,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_basic_search_command() {
        let args = RanklabArgs::try_parse_from([
            "ranklab",
            "search",
            "/data/cranfield",
            "boundary layer flow",
            "--limit",
            "20",
            "--model",
            "lm",
        ])
        .unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.data_dir, PathBuf::from("/data/cranfield"));
            assert_eq!(search_args.query, "boundary layer flow");
            assert_eq!(search_args.limit, 20);
            assert_eq!(search_args.model, ModelChoice::Lm);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_evaluate_command_defaults() {
        let args =
            RanklabArgs::try_parse_from(["ranklab", "evaluate", "/data/cranfield"]).unwrap();

        if let Command::Evaluate(eval_args) = args.command {
            assert_eq!(eval_args.model, ModelChoice::Both);
            assert_eq!(eval_args.top_k, 100);
            assert_eq!(eval_args.k_values, vec![5, 10]);
            assert_eq!(eval_args.mu, DEFAULT_MU);
            assert!(!eval_args.per_query);
            assert!(eval_args.analysis.stemming_enabled());
            assert!(eval_args.analysis.stop_words_enabled());
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_evaluate_custom_k_values() {
        let args = RanklabArgs::try_parse_from([
            "ranklab",
            "evaluate",
            "/data/cranfield",
            "-k",
            "5,10,20",
            "--mu",
            "1500",
        ])
        .unwrap();

        if let Command::Evaluate(eval_args) = args.command {
            assert_eq!(eval_args.k_values, vec![5, 10, 20]);
            assert_eq!(eval_args.mu, 1500.0);
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_analysis_flags() {
        let args = RanklabArgs::try_parse_from([
            "ranklab",
            "stats",
            "/data/cranfield",
            "--no-stemming",
            "--no-stop-words",
        ])
        .unwrap();

        if let Command::Stats(stats_args) = args.command {
            assert!(!stats_args.analysis.stemming_enabled());
            assert!(!stats_args.analysis.stop_words_enabled());
        } else {
            panic!("Expected Stats command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args =
            RanklabArgs::try_parse_from(["ranklab", "stats", "/data"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args =
            RanklabArgs::try_parse_from(["ranklab", "-vv", "stats", "/data"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            RanklabArgs::try_parse_from(["ranklab", "--quiet", "stats", "/data"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            RanklabArgs::try_parse_from(["ranklab", "--format", "json", "stats", "/data"])
                .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
