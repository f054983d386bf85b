//! Corrupted excerpts must be rejected.
//!
//! Documents here use distinct words, so a corrupted word sequence cannot
//! reappear somewhere else by coincidence.

use super::common::words;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use verbatim::{
    check_chunk_fidelity, AdjacentSwap, Corruption, FidelityChecker, WordDeletion, WordSubstitution,
};

fn distinct_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{3,8}", 6..40).prop_map(|set| set.into_iter().collect())
}

/// Chunk of `len` (at least `min`) consecutive words and the document they came from.
fn excerpt(words: &[String], at: prop::sample::Index, len: usize, min: usize) -> (String, String) {
    let len = len.clamp(min, words.len());
    let start = at.index(words.len() - len + 1);
    (words[start..start + len].join(" "), words.join(" "))
}

proptest! {
    /// Property: deleting one interior word is always caught.
    #[test]
    fn prop_interior_deletion_rejected(
        doc_words in distinct_words(),
        at in any::<prop::sample::Index>(),
        len in 3usize..12,
        seed in any::<u64>(),
    ) {
        let (chunk, document) = excerpt(&doc_words, at, len, 3);
        prop_assert!(check_chunk_fidelity(&chunk, &document, false));

        let corrupted = WordDeletion::default().corrupt(&chunk, &mut StdRng::seed_from_u64(seed));
        prop_assert_ne!(&corrupted, &chunk);
        prop_assert!(!check_chunk_fidelity(&corrupted, &document, false));
    }

    /// Property: the diagnostic for a deletion points at the deleted position.
    #[test]
    fn prop_deletion_diagnostic_points_at_gap(
        doc_words in distinct_words(),
        at in any::<prop::sample::Index>(),
        len in 3usize..12,
        seed in any::<u64>(),
    ) {
        let (chunk, document) = excerpt(&doc_words, at, len, 3);
        let corrupted = WordDeletion::default().corrupt(&chunk, &mut StdRng::seed_from_u64(seed));

        let original = words(&chunk);
        let shortened = words(&corrupted);
        let gap = original
            .iter()
            .zip(&shortened)
            .position(|(a, b)| a != b)
            .unwrap_or(shortened.len());

        let verdict = FidelityChecker::default().check(&corrupted, &document);
        let diagnostic = verdict.diagnostic.expect("rejections carry a diagnostic");
        prop_assert_eq!(diagnostic.longest_prefix, gap);
        let divergence = diagnostic.divergence.expect("gap is inside the chunk");
        prop_assert_eq!(divergence.chunk_index, gap);
        prop_assert_eq!(divergence.document_word, Some(original[gap].clone()));
    }

    /// Property: substituting one word is always caught.
    #[test]
    fn prop_substitution_rejected(
        doc_words in distinct_words(),
        at in any::<prop::sample::Index>(),
        len in 2usize..12,
        seed in any::<u64>(),
    ) {
        let (chunk, document) = excerpt(&doc_words, at, len, 2);
        let corrupted = WordSubstitution.corrupt(&chunk, &mut StdRng::seed_from_u64(seed));
        prop_assert_ne!(&corrupted, &chunk);
        prop_assert!(!check_chunk_fidelity(&corrupted, &document, false));
    }

    /// Property: swapping two neighbouring words is always caught.
    #[test]
    fn prop_swap_rejected(
        doc_words in distinct_words(),
        at in any::<prop::sample::Index>(),
        len in 2usize..12,
        seed in any::<u64>(),
    ) {
        let (chunk, document) = excerpt(&doc_words, at, len, 2);
        let corrupted = AdjacentSwap::default().corrupt(&chunk, &mut StdRng::seed_from_u64(seed));
        prop_assert_ne!(&corrupted, &chunk);
        prop_assert!(!check_chunk_fidelity(&corrupted, &document, false));
    }

    /// Property: dropping an endpoint word leaves a genuine excerpt.
    #[test]
    fn prop_endpoint_deletion_still_valid(
        doc_words in distinct_words(),
        at in any::<prop::sample::Index>(),
        len in 2usize..12,
    ) {
        let (chunk, document) = excerpt(&doc_words, at, len, 2);
        let mut chunk_words: Vec<&str> = chunk.split_whitespace().collect();
        chunk_words.remove(0);
        prop_assert!(check_chunk_fidelity(&chunk_words.join(" "), &document, false));
        chunk_words.pop();
        prop_assert!(check_chunk_fidelity(&chunk_words.join(" "), &document, false));
    }

    /// Property: the same seed always produces the same corruption.
    #[test]
    fn prop_corruption_is_reproducible(doc_words in distinct_words(), seed in any::<u64>()) {
        let chunk = doc_words.join(" ");
        let deletion = WordDeletion { interior_only: false };
        let swap = AdjacentSwap::default();
        let strategies: [&dyn Corruption; 3] = [&deletion, &WordSubstitution, &swap];
        for strategy in strategies {
            let first = strategy.corrupt(&chunk, &mut StdRng::seed_from_u64(seed));
            let second = strategy.corrupt(&chunk, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(first, second, "{} not reproducible", strategy.name());
        }
    }
}
