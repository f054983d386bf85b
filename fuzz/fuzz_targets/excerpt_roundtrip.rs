// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for end-to-end validation.
//!
//! Any whitespace-aligned slice of a document must be accepted, and the
//! reported byte range must cover text that tokenizes to the same words.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use verbatim::{tokenize, FidelityChecker, NormalizeOptions};

#[derive(Debug, Arbitrary)]
struct ExcerptInput {
    document: String,
    start: u16,
    len: u16,
}

fuzz_target!(|input: ExcerptInput| {
    let words: Vec<&str> = input.document.split_whitespace().collect();
    if words.is_empty() {
        return;
    }
    let start = input.start as usize % words.len();
    let end = (start + input.len as usize % 32).min(words.len());
    let chunk = words[start..end].join(" ");

    let checker = FidelityChecker::default();
    let prepared = checker.prepare(&input.document);
    let verdict = checker.check_prepared(&chunk, &prepared);
    assert!(verdict.valid, "slice {:?} rejected", chunk);

    let options = NormalizeOptions::default();
    let expected: Vec<String> = tokenize(&chunk, &options).into_iter().map(|t| t.text).collect();
    if let Some(range) = verdict.excerpt.and_then(|e| e.byte_range(prepared.tokens())) {
        let covered: Vec<String> = tokenize(&input.document[range], &options)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(covered, expected);
    }
});
