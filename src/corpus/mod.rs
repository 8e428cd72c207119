//! Parsers for the Cranfield test collection.
//!
//! The collection ships as three plain-text files: documents
//! (`cran.all.1400`), queries (`cran.qry`), and relevance judgments
//! (`cranqrel`). Documents and queries use SMART-style field markers:
//!
//! ```text
//! .I 1
//! .T
//! title lines ...
//! .A
//! author lines ...
//! .W
//! body lines ...
//! ```
//!
//! Only the title and body fields feed retrieval; author and bibliography
//! lines are skipped. Judgments are whitespace-separated
//! `query_id doc_id [grade]` rows; grades are ignored and every listed
//! document counts as relevant.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RanklabError, Result};
use crate::evaluation::{Judgments, QueryId};
use crate::index::DocId;

/// Document id to text.
pub type Documents = BTreeMap<DocId, String>;

/// Query id to text.
pub type Queries = BTreeMap<QueryId, String>;

/// Conventional file names inside a Cranfield data directory.
const DOCUMENTS_FILE: &str = "cran.all.1400";
const QUERIES_FILE: &str = "cran.qry";
const QRELS_FILE: &str = "cranqrel";

/// The three parsed pieces of the collection.
#[derive(Debug, Clone)]
pub struct CranfieldCollection {
    /// Documents by id, title and body concatenated.
    pub documents: Documents,
    /// Query text by id.
    pub queries: Queries,
    /// Relevant document sets by query id.
    pub judgments: Judgments,
}

impl CranfieldCollection {
    /// Load the collection from a directory containing the three standard
    /// files.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let doc_path = require_file(data_dir, DOCUMENTS_FILE)?;
        let query_path = require_file(data_dir, QUERIES_FILE)?;
        let qrels_path = require_file(data_dir, QRELS_FILE)?;

        Ok(CranfieldCollection {
            documents: parse_documents(&fs::read_to_string(doc_path)?)?,
            queries: parse_queries(&fs::read_to_string(query_path)?)?,
            judgments: parse_qrels(&fs::read_to_string(qrels_path)?)?,
        })
    }
}

fn require_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(RanklabError::corpus(format!(
            "required file not found: {}",
            path.display()
        )));
    }
    Ok(path)
}

fn parse_id(line: &str) -> Result<u32> {
    let raw = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| RanklabError::corpus(format!("malformed id marker: {line:?}")))?;
    raw.parse()
        .map_err(|_| RanklabError::corpus(format!("invalid id in marker: {line:?}")))
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Author,
    Bibliography,
    Body,
    None,
}

/// Parse a SMART-format document file into id-to-text.
///
/// Title and body lines are joined with single spaces; the other fields
/// are dropped. A document with neither field parses to an empty string.
pub fn parse_documents(content: &str) -> Result<Documents> {
    let mut documents = Documents::new();
    let mut current_id: Option<DocId> = None;
    let mut current_text: Vec<&str> = Vec::new();
    let mut field = Field::None;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with(".I") {
            if let Some(id) = current_id {
                documents.insert(id, current_text.join(" "));
            }
            current_id = Some(parse_id(line)?);
            current_text.clear();
            field = Field::None;
        } else if line.starts_with(".T") {
            field = Field::Title;
        } else if line.starts_with(".A") {
            field = Field::Author;
        } else if line.starts_with(".B") {
            field = Field::Bibliography;
        } else if line.starts_with(".W") {
            field = Field::Body;
        } else if matches!(field, Field::Title | Field::Body) && !line.is_empty() {
            current_text.push(line);
        }
    }
    if let Some(id) = current_id {
        documents.insert(id, current_text.join(" "));
    }

    Ok(documents)
}

/// Parse a SMART-format query file into id-to-text.
///
/// Queries only carry `.I` and `.W` markers; everything after `.W` up to
/// the next `.I` is the query text.
pub fn parse_queries(content: &str) -> Result<Queries> {
    let mut queries = Queries::new();
    let mut current_id: Option<QueryId> = None;
    let mut current_text: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with(".I") {
            if let Some(id) = current_id {
                queries.insert(id, current_text.join(" "));
            }
            current_id = Some(parse_id(line)?);
            current_text.clear();
            in_body = false;
        } else if line.starts_with(".W") {
            in_body = true;
        } else if in_body && !line.is_empty() {
            current_text.push(line);
        }
    }
    if let Some(id) = current_id {
        queries.insert(id, current_text.join(" "));
    }

    Ok(queries)
}

/// Parse relevance judgments into query id to relevant document set.
///
/// Each row is `query_id doc_id` with an optional trailing grade, which is
/// ignored. Rows with fewer than two columns are skipped.
pub fn parse_qrels(content: &str) -> Result<Judgments> {
    let mut judgments = Judgments::new();

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(query_raw), Some(doc_raw)) = (parts.next(), parts.next()) else {
            continue;
        };
        let query_id: QueryId = query_raw
            .parse()
            .map_err(|_| RanklabError::corpus(format!("invalid query id in row: {line:?}")))?;
        let doc_id: DocId = doc_raw
            .parse()
            .map_err(|_| RanklabError::corpus(format!("invalid doc id in row: {line:?}")))?;

        judgments
            .entry(query_id)
            .or_insert_with(BTreeSet::new)
            .insert(doc_id);
    }

    Ok(judgments)
}
