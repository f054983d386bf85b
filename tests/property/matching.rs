//! The KMP scan against brute force, and acceptance of genuine excerpts.

use super::common::{naive_find, naive_longest_prefix};
use proptest::prelude::*;
use verbatim::{check_chunk_fidelity, find_contiguous, longest_prefix, matcher::prefix_table};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Words over a three-letter alphabet, so repeats and overlaps are common.
fn tiny_words(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["a", "b", "c"]).prop_map(str::to_string),
        0..max,
    )
}

/// Plain lowercase prose.
fn prose() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 1..60)
}

// ============================================================================
// SCAN PROPERTIES
// ============================================================================

proptest! {
    /// Property: KMP finds exactly the first occurrence brute force finds.
    #[test]
    fn prop_kmp_agrees_with_naive(chunk in tiny_words(8), document in tiny_words(40)) {
        prop_assert_eq!(find_contiguous(&chunk, &document), naive_find(&chunk, &document));
    }

    /// Property: a reported offset always points at the chunk, word for word.
    #[test]
    fn prop_found_offset_is_verbatim(chunk in tiny_words(6), document in tiny_words(40)) {
        if let Some(start) = find_contiguous(&chunk, &document) {
            prop_assert_eq!(&document[start..start + chunk.len()], chunk.as_slice());
        }
    }

    /// Property: the longest prefix is a real occurrence and nothing longer exists.
    #[test]
    fn prop_longest_prefix_is_maximal(chunk in tiny_words(8), document in tiny_words(30)) {
        let (longest, offset) = longest_prefix(&chunk, &document);
        prop_assert!(offset + longest <= document.len());
        prop_assert_eq!(&document[offset..offset + longest], &chunk[..longest]);
        prop_assert_eq!(longest, naive_longest_prefix(&chunk, &document));
    }

    /// Property: prefix table entries are proper border lengths.
    #[test]
    fn prop_prefix_table_entries_are_borders(pattern in tiny_words(16)) {
        let table = prefix_table(&pattern);
        prop_assert_eq!(table.len(), pattern.len());
        for (i, &border) in table.iter().enumerate() {
            prop_assert!(border <= i);
            prop_assert_eq!(&pattern[..border], &pattern[i + 1 - border..=i]);
        }
    }
}

// ============================================================================
// END-TO-END ACCEPTANCE
// ============================================================================

proptest! {
    /// Property: every contiguous run of document words is accepted.
    #[test]
    fn prop_contiguous_span_validates(
        words in prose(),
        at in any::<prop::sample::Index>(),
        len in 0usize..20,
    ) {
        let len = len.min(words.len());
        let start = at.index(words.len() - len + 1);
        let document = words.join(" ");
        let chunk = words[start..start + len].join(" ");
        prop_assert!(check_chunk_fidelity(&chunk, &document, false));
    }

    /// Property: the whole document is always an excerpt of itself.
    #[test]
    fn prop_document_validates_against_itself(text in ".{0,200}") {
        prop_assert!(check_chunk_fidelity(&text, &text, false));
    }

    /// Property: a chunk with no word tokens is vacuously valid.
    #[test]
    fn prop_punctuation_only_chunk_is_valid(chunk in "[ .,;:!?()\\-]{0,20}", text in ".{0,100}") {
        prop_assert!(check_chunk_fidelity(&chunk, &text, false));
    }

    /// Property: validation is a pure function of its inputs.
    #[test]
    fn prop_validation_is_deterministic(chunk in "[a-c ]{0,20}", document in "[a-c ]{0,60}") {
        let first = check_chunk_fidelity(&chunk, &document, false);
        let second = check_chunk_fidelity(&chunk, &document, true);
        prop_assert_eq!(first, second);
    }
}
