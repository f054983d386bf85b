// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word tokenization and normalization.
//!
//! Chunks and documents are compared word by word, so both go through the same
//! pipeline: split on whitespace, trim punctuation hugging the word, fold
//! apostrophe variants, compose Unicode, lowercase. Words made entirely of
//! punctuation (`–`, `(`, `...`) produce no token at all.
//!
//! ```text
//! "Giants of the Ice Age (3 ed.)."
//!   → giants · of · the · ice · age · 3 · ed
//! ```
//!
//! # Invariants
//!
//! 1. **DETERMINISTIC**: same text and options always give the same tokens
//! 2. **ORDER_PRESERVING**: token `i` starts before token `i + 1` in the raw text
//! 3. **SLICEABLE**: `start..end` of every token is a char-boundary range of the input

use serde::{Deserialize, Serialize};

use crate::types::Token;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalization policy, applied identically to chunk and document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Compare words with their original case.
    pub case_sensitive: bool,
    /// Drop combining marks so that "café" and "cafe" compare equal.
    /// Needs the `unicode-normalization` feature; ignored without it.
    pub fold_diacritics: bool,
}

/// Tokenize `text` into normalized words with byte offsets.
pub fn tokenize(text: &str, options: &NormalizeOptions) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (offset, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                push_word(&mut tokens, text, start, offset, options);
            }
        } else if word_start.is_none() {
            word_start = Some(offset);
        }
    }
    if let Some(start) = word_start {
        push_word(&mut tokens, text, start, text.len(), options);
    }

    tokens
}

/// Normalize a single word. Returns `None` for punctuation-only input.
pub fn normalize_word(word: &str, options: &NormalizeOptions) -> Option<String> {
    let (_, core) = trim_word(word)?;
    normalize_core(core, options)
}

fn push_word(
    tokens: &mut Vec<Token>,
    text: &str,
    start: usize,
    end: usize,
    options: &NormalizeOptions,
) {
    let word = &text[start..end];
    let Some((lead, core)) = trim_word(word) else {
        return;
    };
    if let Some(normalized) = normalize_core(core, options) {
        tokens.push(Token {
            text: normalized,
            start: start + lead,
            end: start + lead + core.len(),
        });
    }
}

/// Strip leading/trailing punctuation. Returns the byte offset of the core
/// within `word` and the core itself.
fn trim_word(word: &str) -> Option<(usize, &str)> {
    let leading = word.trim_start_matches(is_word_boundary);
    let core = leading.trim_end_matches(is_word_boundary);
    if core.is_empty() {
        return None;
    }
    Some((word.len() - leading.len(), core))
}

fn normalize_core(core: &str, options: &NormalizeOptions) -> Option<String> {
    let folded: String = core.chars().map(fold_apostrophe).collect();
    let composed = compose(&folded, options);
    if composed.is_empty() {
        return None;
    }
    if options.case_sensitive {
        Some(composed)
    } else {
        Some(composed.to_lowercase())
    }
}

/// Canonical Unicode form for comparison.
///
/// NFC by default so precomposed and decomposed input agree; NFD with combining
/// marks removed when diacritics are folded.
#[cfg(feature = "unicode-normalization")]
fn compose(word: &str, options: &NormalizeOptions) -> String {
    if options.fold_diacritics {
        word.nfd().filter(|c| !is_combining_mark(*c)).collect()
    } else {
        word.nfc().collect()
    }
}

#[cfg(not(feature = "unicode-normalization"))]
fn compose(word: &str, _options: &NormalizeOptions) -> String {
    word.to_string()
}

fn fold_apostrophe(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
        other => other,
    }
}

/// Characters trimmed from word edges.
///
/// Combining marks count as word characters, otherwise a decomposed trailing
/// accent would be cut off the word.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric() && !is_combining_mark(c)
}

/// Check if a character is a combining mark (diacritic).
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
