use std::collections::BTreeMap;
use std::sync::Arc;

use ranklab::analysis::analyzer::standard_analyzer;
use ranklab::error::Result;
use ranklab::index::{DocId, InvertedIndex};
use ranklab::retrieval::{RetrievalModel, UnigramLanguageModel, VectorSpaceModel};

fn aerodynamics_corpus() -> BTreeMap<DocId, String> {
    let docs = [
        (
            1,
            "experimental investigation of the aerodynamics of a wing in a slipstream",
        ),
        (
            2,
            "the boundary layer in simple shear flow past a flat plate",
        ),
        (
            3,
            "heat transfer in the turbulent boundary layer of a heated flat plate",
        ),
        (4, "propeller slipstream effects on wing lift distribution"),
        (5, "chemical composition of volcanic rock samples"),
    ];
    docs.iter()
        .map(|&(id, text)| (id, text.to_string()))
        .collect()
}

fn build_index(docs: &BTreeMap<DocId, String>) -> Result<Arc<InvertedIndex>> {
    let mut index = InvertedIndex::new(standard_analyzer());
    index.build(docs)?;
    Ok(Arc::new(index))
}

#[test]
fn vector_space_discards_documents_with_no_term_overlap() -> Result<()> {
    let index = build_index(&aerodynamics_corpus())?;
    let model = VectorSpaceModel::new(index)?;

    let results = model.retrieve("boundary layer flow", 100)?;

    // The geology document shares no vocabulary with the query.
    assert!(!results.is_empty());
    assert!(results.iter().all(|doc| doc.doc_id != 5));
    assert!(results.iter().all(|doc| doc.score > 0.0));
    Ok(())
}

#[test]
fn language_model_ranks_every_document() -> Result<()> {
    let docs = aerodynamics_corpus();
    let index = build_index(&docs)?;
    let model = UnigramLanguageModel::new(index)?;

    let results = model.retrieve("boundary layer flow", 100)?;

    assert_eq!(results.len(), docs.len());
    assert!(results.iter().any(|doc| doc.doc_id == 5));
    // The off-topic document scores worst.
    assert_eq!(results.last().unwrap().doc_id, 5);
    Ok(())
}

#[test]
fn language_model_truncates_to_top_k() -> Result<()> {
    let index = build_index(&aerodynamics_corpus())?;
    let model = UnigramLanguageModel::new(index)?;

    let results = model.retrieve("boundary layer flow", 3)?;
    assert_eq!(results.len(), 3);
    Ok(())
}

#[test]
fn both_models_agree_on_the_best_document_for_a_focused_query() -> Result<()> {
    let index = build_index(&aerodynamics_corpus())?;
    let vsm = VectorSpaceModel::new(Arc::clone(&index))?;
    let lm = UnigramLanguageModel::new(index)?;

    // Only document 1 and 4 mention the slipstream; 4 is shorter and more
    // focused, but both models must put a slipstream document first.
    let vsm_top = vsm.retrieve("propeller slipstream", 1)?;
    let lm_top = lm.retrieve("propeller slipstream", 1)?;

    assert_eq!(vsm_top[0].doc_id, 4);
    assert_eq!(lm_top[0].doc_id, 4);
    Ok(())
}

#[test]
fn rankings_are_sorted_and_deterministic() -> Result<()> {
    let index = build_index(&aerodynamics_corpus())?;
    let vsm = VectorSpaceModel::new(Arc::clone(&index))?;
    let lm = UnigramLanguageModel::new(index)?;

    for model in [&vsm as &dyn RetrievalModel, &lm as &dyn RetrievalModel] {
        let first = model.retrieve("heated flat plate", 100)?;
        let second = model.retrieve("heated flat plate", 100)?;

        assert_eq!(first, second, "{} ranking not deterministic", model.name());
        for window in first.windows(2) {
            assert!(
                window[0].score > window[1].score
                    || (window[0].score == window[1].score
                        && window[0].doc_id < window[1].doc_id)
            );
        }
    }
    Ok(())
}

#[test]
fn empty_query_retrieves_nothing() -> Result<()> {
    let index = build_index(&aerodynamics_corpus())?;
    let vsm = VectorSpaceModel::new(Arc::clone(&index))?;
    let lm = UnigramLanguageModel::new(index)?;

    // "the" and "of" are stop words, so the query analyzes to nothing.
    assert!(vsm.retrieve("the of", 10)?.is_empty());
    assert!(lm.retrieve("the of", 10)?.is_empty());
    assert!(vsm.retrieve("", 10)?.is_empty());
    Ok(())
}

#[test]
fn rebuilding_the_index_replaces_prior_state() -> Result<()> {
    let mut index = InvertedIndex::new(standard_analyzer());
    index.build(&aerodynamics_corpus())?;
    let stats_before = index.stats();

    let replacement: BTreeMap<DocId, String> =
        [(10, "supersonic nozzle design".to_string())].into_iter().collect();
    index.build(&replacement)?;

    let stats_after = index.stats();
    assert_eq!(stats_after.num_docs, 1);
    assert_ne!(stats_before.num_docs, stats_after.num_docs);
    assert_eq!(index.doc_ids(), &[10]);

    // No term from the old collection survives.
    assert_eq!(index.doc_freq("slipstream"), 0);
    Ok(())
}

#[test]
fn rebuilding_with_the_same_documents_is_idempotent() -> Result<()> {
    let docs = aerodynamics_corpus();
    let mut index = InvertedIndex::new(standard_analyzer());
    index.build(&docs)?;
    let stats_first = index.stats();

    index.build(&docs)?;
    assert_eq!(index.stats(), stats_first);
    Ok(())
}

#[test]
fn models_require_a_built_index() {
    let index = Arc::new(InvertedIndex::new(standard_analyzer()));
    assert!(VectorSpaceModel::new(Arc::clone(&index)).is_err());
    assert!(UnigramLanguageModel::new(index).is_err());
}
