//! # Ranklab
//!
//! Ranked retrieval models and IR evaluation for small test collections.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Configurable text analysis pipeline
//! - Shared inverted index with document and collection statistics
//! - TF-IDF vector space and Dirichlet-smoothed language model ranking
//! - Standard IR metrics: P/R/F1@K, MAP, MRR, nDCG@K, ERR@K, R-Precision
//! - Cranfield collection parsers

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod retrieval;

pub use evaluation::QueryId;
pub use index::DocId;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
