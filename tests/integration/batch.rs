//! Batch validation over chunked synthetic documents.

use super::common::{reference_chunks, synthetic_document};
use rand::rngs::StdRng;
use rand::SeedableRng;
use verbatim::{
    check_chunk_fidelity, validate_batch, Corruption, FidelityChecker, WordDeletion,
};

const SEED: u64 = 2024;

#[test]
fn test_reference_chunks_all_validate() {
    let document = synthetic_document(SEED);
    let chunks = reference_chunks(&document);
    assert!(chunks.len() > 1, "document should span several chunks");

    let checker = FidelityChecker::default();
    let report = validate_batch(&checker, &checker.prepare(&document), &chunks);
    assert!(report.all_valid(), "rejected: {:?}", report.invalid_indices());
    assert_eq!(report.len(), chunks.len());
}

#[test]
fn test_corrupted_first_chunk_is_the_only_rejection() {
    let document = synthetic_document(SEED);
    let mut chunks = reference_chunks(&document);
    let mut rng = StdRng::seed_from_u64(SEED);
    chunks[0] = WordDeletion::default().corrupt(&chunks[0], &mut rng);

    let flags: Vec<bool> = chunks
        .iter()
        .map(|chunk| check_chunk_fidelity(chunk, &document, false))
        .collect();
    assert!(!flags[0], "corrupted chunk was accepted");
    assert!(flags[1..].iter().all(|&ok| ok));

    let checker = FidelityChecker::default();
    let report = validate_batch(&checker, &checker.prepare(&document), &chunks);
    assert_eq!(report.flags(), flags);
    assert_eq!(report.invalid_indices(), vec![0]);
}

#[test]
fn test_batch_matches_single_checks_across_seeds() {
    let checker = FidelityChecker::default();
    for seed in 0..4 {
        let document = synthetic_document(seed);
        let mut chunks = reference_chunks(&document);
        let mut rng = StdRng::seed_from_u64(seed);
        for chunk in chunks.iter_mut().step_by(2) {
            *chunk = WordDeletion::default().corrupt(chunk, &mut rng);
        }

        let prepared = checker.prepare(&document);
        let report = validate_batch(&checker, &prepared, &chunks);
        for (chunk, verdict) in chunks.iter().zip(&report.verdicts) {
            assert_eq!(verdict.valid, checker.check(chunk, &document).valid);
        }
    }
}

#[test]
fn test_batch_summary_serializes() {
    let document = synthetic_document(SEED);
    let mut chunks = reference_chunks(&document);
    chunks.push("not a real excerpt at all".to_string());

    let checker = FidelityChecker::default();
    let summary = validate_batch(&checker, &checker.prepare(&document), &chunks).summary();
    let json = serde_json::to_value(&summary).expect("summary serializes");

    assert_eq!(json["total"], chunks.len());
    assert_eq!(json["valid"], chunks.len() - 1);
    assert_eq!(json["invalid"], serde_json::json!([chunks.len() - 1]));
    assert_eq!(json["all_valid"], false);
}
