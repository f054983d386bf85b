// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target comparing the KMP scan with a brute-force window search.
//!
//! A tiny alphabet makes repeated and overlapping patterns common, which is
//! where failure-function bugs show up.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use verbatim::{find_contiguous, longest_prefix};

#[derive(Debug, Arbitrary)]
struct ScanInput {
    chunk: Vec<u8>,
    document: Vec<u8>,
}

fn words(bytes: &[u8]) -> Vec<String> {
    bytes
        .iter()
        .take(64)
        .map(|b| ["a", "b", "c"][(*b % 3) as usize].to_string())
        .collect()
}

fuzz_target!(|input: ScanInput| {
    let chunk = words(&input.chunk);
    let document = words(&input.document);

    let naive = if chunk.is_empty() {
        Some(0)
    } else {
        document.windows(chunk.len()).position(|w| w == chunk.as_slice())
    };
    assert_eq!(find_contiguous(&chunk, &document), naive);

    let (longest, offset) = longest_prefix(&chunk, &document);
    assert!(longest <= chunk.len());
    assert!(offset + longest <= document.len());
    assert_eq!(&document[offset..offset + longest], &chunk[..longest]);

    // Nothing longer exists anywhere
    let best = (0..=document.len())
        .map(|s| {
            chunk
                .iter()
                .zip(&document[s..])
                .take_while(|(c, d)| c == d)
                .count()
        })
        .max()
        .unwrap_or(0);
    assert_eq!(longest, best);
    if naive.is_some() {
        assert_eq!(longest, chunk.len());
    }
});
