// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-level matching of a chunk against a document.
//!
//! The default mode asks whether the chunk's token sequence appears as one
//! unbroken run inside the document's token sequence. That is plain substring
//! search with words as the alphabet, so we use Knuth-Morris-Pratt: build the
//! failure table over the chunk once, then stream the document through it.
//! Every document token is examined a constant number of times (amortized),
//! which keeps thousand-word chunks against megabyte documents linear.
//!
//! ```text
//! chunk:     giants of the ice age 3 ed
//! document:  mammoths giants of the ice age 3 ed with some extra words here
//!                     ^^^^^^^^^^^^^^^^^^^^^^^^^^
//!                     offset 1
//! ```
//!
//! The KMP state after each document token is the longest chunk prefix ending
//! there, so the maximum state seen is the diagnostic for a rejected chunk for
//! free: how far the best alignment got and which word broke it.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **ACCEPT_IFF_PRESENT**: `Contiguous` accepts iff `document[i..i+m] == chunk` for some `i`
//! 2. **EVIDENCE**: every accepted verdict carries an `Excerpt` proving the match
//! 3. **NO_PANIC**: any pair of token slices yields a verdict; rejection is not an error

use crate::types::{Diagnostic, Divergence, MatchMode, Verdict};
use crate::verify::contracts::{check_match_verbatim, check_prefix_bound, check_prefix_table};
use crate::verify::Excerpt;

/// Build the KMP failure table for `pattern`.
///
/// `table[i]` is the length of the longest proper prefix of `pattern[..=i]`
/// that is also its suffix.
pub fn prefix_table<T: AsRef<str>>(pattern: &[T]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut k = 0;

    for i in 1..pattern.len() {
        let token = pattern[i].as_ref();
        while k > 0 && token != pattern[k].as_ref() {
            k = table[k - 1];
        }
        if token == pattern[k].as_ref() {
            k += 1;
        }
        table[i] = k;
    }

    check_prefix_table(pattern, &table);
    table
}

/// Result of one KMP pass over the document.
struct Scan {
    found: Option<usize>,
    longest: usize,
    best_offset: usize,
}

fn kmp_scan<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D]) -> Scan {
    let m = chunk.len();
    if m == 0 {
        return Scan {
            found: Some(0),
            longest: 0,
            best_offset: 0,
        };
    }

    let table = prefix_table(chunk);
    let mut q = 0;
    let mut longest = 0;
    let mut best_offset = 0;

    for (i, token) in document.iter().enumerate() {
        let token = token.as_ref();
        while q > 0 && token != chunk[q].as_ref() {
            q = table[q - 1];
        }
        if token == chunk[q].as_ref() {
            q += 1;
        }
        if q > longest {
            longest = q;
            best_offset = i + 1 - q;
        }
        if q == m {
            return Scan {
                found: Some(i + 1 - m),
                longest,
                best_offset,
            };
        }
    }

    Scan {
        found: None,
        longest,
        best_offset,
    }
}

/// Offset of the first contiguous occurrence of `chunk` in `document`.
///
/// An empty chunk occurs at offset 0.
pub fn find_contiguous<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D]) -> Option<usize> {
    kmp_scan(chunk, document).found
}

/// Longest prefix of `chunk` that occurs contiguously in `document`.
///
/// Returns `(prefix_len, document_offset)`; the offset is that of the first
/// occurrence reaching that length, or 0 when nothing matched.
pub fn longest_prefix<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D]) -> (usize, usize) {
    let scan = kmp_scan(chunk, document);
    (scan.longest, scan.best_offset)
}

/// Decide whether `chunk` occurs in `document` under `mode`.
pub fn validate<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D], mode: MatchMode) -> Verdict {
    match mode {
        MatchMode::Contiguous => validate_contiguous(chunk, document),
        MatchMode::Subsequence => validate_subsequence(chunk, document),
    }
}

/// Brute-force answer to "does `chunk` occur in `document` under `mode`?".
///
/// Quadratic; used as an independent reference for the KMP scan, e.g. to tell
/// a corruption that happens to be a genuine excerpt from a missed one.
pub fn occurs_naive<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D], mode: MatchMode) -> bool {
    match mode {
        MatchMode::Contiguous => {
            chunk.is_empty()
                || document.windows(chunk.len()).any(|window| {
                    window
                        .iter()
                        .zip(chunk)
                        .all(|(d, c)| d.as_ref() == c.as_ref())
                })
        }
        MatchMode::Subsequence => {
            let mut rest = document.iter();
            chunk
                .iter()
                .all(|c| rest.any(|d| d.as_ref() == c.as_ref()))
        }
    }
}

fn validate_contiguous<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D]) -> Verdict {
    let scan = kmp_scan(chunk, document);

    if let Some(offset) = scan.found {
        check_match_verbatim(chunk, document, offset);
        match Excerpt::contiguous(chunk, document, offset) {
            Ok(excerpt) => {
                log::trace!("chunk of {} tokens found at token {}", chunk.len(), offset);
                return Verdict::accepted(excerpt);
            }
            Err(e) => log::error!("matcher reported offset {} but {}", offset, e),
        }
    }

    Verdict::rejected(diagnose(chunk, document, scan.longest, scan.best_offset))
}

fn validate_subsequence<C: AsRef<str>, D: AsRef<str>>(chunk: &[C], document: &[D]) -> Verdict {
    // Greedy earliest match maximizes the matched prefix.
    let mut positions = Vec::with_capacity(chunk.len());
    for (i, token) in document.iter().enumerate() {
        match chunk.get(positions.len()) {
            Some(expected) if expected.as_ref() == token.as_ref() => positions.push(i),
            Some(_) => {}
            None => break,
        }
    }

    if positions.len() == chunk.len() {
        match Excerpt::from_positions(chunk, document, &positions) {
            Ok(excerpt) => return Verdict::accepted(excerpt),
            Err(e) => log::error!("subsequence positions rejected: {}", e),
        }
    }

    let matched = positions.len();
    let best_offset = positions.first().copied().unwrap_or(0);
    check_prefix_bound(matched, best_offset, chunk.len(), document.len());

    Verdict::rejected(Diagnostic {
        chunk_len: chunk.len(),
        document_len: document.len(),
        longest_prefix: matched,
        best_offset,
        divergence: chunk.get(matched).map(|word| Divergence {
            chunk_index: matched,
            chunk_word: word.as_ref().to_string(),
            document_word: None,
        }),
    })
}

fn diagnose<C: AsRef<str>, D: AsRef<str>>(
    chunk: &[C],
    document: &[D],
    longest: usize,
    best_offset: usize,
) -> Diagnostic {
    check_prefix_bound(longest, best_offset, chunk.len(), document.len());

    Diagnostic {
        chunk_len: chunk.len(),
        document_len: document.len(),
        longest_prefix: longest,
        best_offset,
        divergence: chunk.get(longest).map(|word| Divergence {
            chunk_index: longest,
            chunk_word: word.as_ref().to_string(),
            document_word: document
                .get(best_offset + longest)
                .map(|w| w.as_ref().to_string()),
        }),
    }
}
