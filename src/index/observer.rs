//! Progress observation for long-running operations.
//!
//! The index and the retrieval models report milestones through this trait
//! instead of writing to the console. Observers are optional and never
//! required for correctness; every method has an empty default body.

use crate::index::inverted::IndexStats;

/// Observer invoked at build and retrieval milestones.
pub trait ProgressObserver: Send + Sync {
    /// Called when an index build starts, with the number of documents.
    fn on_build_started(&self, _num_docs: usize) {}

    /// Called after every document has been indexed and statistics computed.
    fn on_build_finished(&self, _stats: &IndexStats) {}

    /// Called when a retrieval model finishes scoring a query.
    fn on_query_scored(&self, _model: &str, _candidates: usize) {}
}

/// Observer that ignores all milestones.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        events: Mutex<Vec<String>>,
    }

    impl ProgressObserver for Recording {
        fn on_build_started(&self, num_docs: usize) {
            self.events.lock().unwrap().push(format!("start:{num_docs}"));
        }

        fn on_build_finished(&self, stats: &IndexStats) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finish:{}", stats.num_docs));
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        let observer = NoopObserver;
        observer.on_build_started(3);
        observer.on_query_scored("vsm", 10);
    }

    #[test]
    fn test_recording_observer() {
        let observer = Recording::default();
        observer.on_build_started(2);
        let stats = IndexStats {
            num_docs: 2,
            vocabulary_size: 4,
            total_terms: 6,
            total_postings: 5,
            avg_doc_length: 3.0,
        };
        observer.on_build_finished(&stats);

        let events = observer.events.lock().unwrap();
        assert_eq!(*events, vec!["start:2", "finish:2"]);
    }
}
