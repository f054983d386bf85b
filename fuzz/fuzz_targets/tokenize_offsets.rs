// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the tokenizer.
//!
//! Every token must point at a real, in-order slice of the input, and
//! normalizing that slice on its own must give back the token text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use verbatim::{normalize_word, tokenize, NormalizeOptions};

#[derive(Debug, Arbitrary)]
struct TokenizeInput {
    text: String,
    case_sensitive: bool,
    fold_diacritics: bool,
}

fuzz_target!(|input: TokenizeInput| {
    let options = NormalizeOptions {
        case_sensitive: input.case_sensitive,
        fold_diacritics: input.fold_diacritics,
    };
    let tokens = tokenize(&input.text, &options);

    let mut last_end = 0;
    for token in &tokens {
        assert!(token.start < token.end, "empty span {:?}", token);
        assert!(token.start >= last_end, "overlapping spans at {:?}", token);
        assert!(token.end <= input.text.len());
        assert!(!token.text.is_empty());

        let slice = input
            .text
            .get(token.start..token.end)
            .expect("span must fall on char boundaries");
        assert_eq!(
            normalize_word(slice, &options).as_deref(),
            Some(token.text.as_str()),
            "re-normalizing {:?} changed it",
            slice
        );
        last_end = token.end;
    }
});
