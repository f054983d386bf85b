// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the word-level matcher.
//!
//! Debug-mode assertions that verify the matcher's internal invariants:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function       | Property                                              |
//! |-------------------------|-------------------------------------------------------|
//! | `check_prefix_table`    | `table[i]` is the longest proper border of `p[..=i]`  |
//! | `check_match_verbatim`  | a reported offset really holds the chunk              |
//! | `check_prefix_bound`    | diagnostic prefix fits in both chunk and document     |

const MAX_CHECKED_PATTERN: usize = 256;

/// Check that a KMP failure table is correct for `pattern`.
///
/// `table[i]` must be the length of the longest proper prefix of
/// `pattern[..=i]` that is also a suffix of it.
///
/// # Panics (debug builds only)
/// Panics if any entry is not a border, or a longer border exists.
#[inline]
pub fn check_prefix_table<T: AsRef<str>>(pattern: &[T], table: &[usize]) {
    if !cfg!(debug_assertions) {
        return;
    }

    debug_assert_eq!(
        pattern.len(),
        table.len(),
        "Contract violation: PrefixTable - table.len() {} != pattern.len() {}",
        table.len(),
        pattern.len()
    );

    for (i, &border) in table.iter().enumerate() {
        debug_assert!(
            border <= i,
            "Contract violation: PrefixTable - table[{}] = {} is not a proper border",
            i,
            border
        );

        let is_border = |len: usize| {
            (0..len).all(|k| pattern[k].as_ref() == pattern[i + 1 - len + k].as_ref())
        };

        debug_assert!(
            is_border(border),
            "Contract violation: PrefixTable - table[{}] = {} is not a border",
            i,
            border
        );

        // Maximality is cubic in the pattern length; only check short patterns.
        if pattern.len() <= MAX_CHECKED_PATTERN {
            let longer = (border + 1..=i).rev().find(|&len| is_border(len));
            debug_assert!(
                longer.is_none(),
                "Contract violation: PrefixTable - table[{}] = {} but border {:?} exists",
                i,
                border,
                longer
            );
        }
    }
}

/// Check that `chunk` occurs word for word at `document[start..]`.
///
/// # Panics (debug builds only)
/// Panics if the range is out of bounds or any token differs.
#[inline]
pub fn check_match_verbatim<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D], start: usize) {
    debug_assert!(
        start + chunk.len() <= document.len(),
        "Contract violation: MatchVerbatim - {}..{} exceeds document length {}",
        start,
        start + chunk.len(),
        document.len()
    );

    for (i, token) in chunk.iter().enumerate() {
        debug_assert!(
            document
                .get(start + i)
                .is_some_and(|d| d.as_ref() == token.as_ref()),
            "Contract violation: MatchVerbatim - chunk[{}] '{}' != document[{}]",
            i,
            token.as_ref(),
            start + i
        );
    }
}

/// Check that a reported longest prefix is consistent with both sequences.
///
/// # Panics (debug builds only)
/// Panics if the prefix is longer than the chunk or runs past the document.
#[inline]
pub fn check_prefix_bound(longest: usize, best_offset: usize, chunk_len: usize, document_len: usize) {
    debug_assert!(
        longest <= chunk_len,
        "Contract violation: PrefixBound - longest prefix {} > chunk length {}",
        longest,
        chunk_len
    );
    debug_assert!(
        best_offset + longest <= document_len,
        "Contract violation: PrefixBound - {}..{} exceeds document length {}",
        best_offset,
        best_offset + longest,
        document_len
    );
}
