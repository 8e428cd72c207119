//! In-memory inverted index over a document collection.
//!
//! The index is built once from a mapping of document id to raw text and is
//! immutable afterwards. Both retrieval models and the evaluator read the
//! same frozen index, which is what keeps term statistics consistent across
//! every consumer. Rebuilding fully replaces all prior state; nothing
//! accumulates across builds.
//!
//! All read operations are total: unseen terms and unknown documents resolve
//! to zero or empty defaults rather than errors.

pub mod inverted;
pub mod observer;

pub use inverted::{DocId, IndexStats, InvertedIndex, Posting};
pub use observer::{NoopObserver, ProgressObserver};
