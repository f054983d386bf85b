// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunk corruption strategies for negative-path testing.
//!
//! Each strategy turns a valid chunk into one that should be rejected. The
//! random source is always passed in, so a fixed seed reproduces the same
//! corruption. Corrupted chunks are rejoined with single spaces.
//!
//! Only words that carry at least one alphanumeric character are touched.
//! Deleting a bare `–` changes nothing the checker can see.

use rand::{Rng, RngCore};

use crate::tokenize::{normalize_word, NormalizeOptions};

/// A transformation that should turn a valid chunk into an invalid one.
pub trait Corruption {
    fn name(&self) -> &'static str;

    /// Return the corrupted chunk, or the chunk unchanged if the strategy has
    /// nothing to work with (e.g. deleting from a one-word chunk).
    fn corrupt(&self, chunk: &str, rng: &mut dyn RngCore) -> String;
}

/// Remove one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordDeletion {
    /// Never remove the first or last word. Dropping an endpoint leaves a
    /// shorter chunk that is still a genuine excerpt.
    pub interior_only: bool,
}

impl Default for WordDeletion {
    fn default() -> Self {
        Self {
            interior_only: true,
        }
    }
}

impl Corruption for WordDeletion {
    fn name(&self) -> &'static str {
        "word-deletion"
    }

    fn corrupt(&self, chunk: &str, rng: &mut dyn RngCore) -> String {
        let mut words: Vec<&str> = chunk.split_whitespace().collect();
        let mut candidates = word_bearing(&words);

        if candidates.len() < 2 {
            return chunk.to_string();
        }
        if self.interior_only {
            candidates.pop();
            candidates.remove(0);
            if candidates.is_empty() {
                return chunk.to_string();
            }
        }

        let index = candidates[rng.random_range(0..candidates.len())];
        words.remove(index);
        words.join(" ")
    }
}

/// Replace one word with a look-alike that differs in its first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordSubstitution;

impl Corruption for WordSubstitution {
    fn name(&self) -> &'static str {
        "word-substitution"
    }

    fn corrupt(&self, chunk: &str, rng: &mut dyn RngCore) -> String {
        let words: Vec<&str> = chunk.split_whitespace().collect();
        let candidates = word_bearing(&words);
        if candidates.is_empty() {
            return chunk.to_string();
        }

        let index = candidates[rng.random_range(0..candidates.len())];
        let replaced = mutate_word(words[index]);
        let mut out: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        out[index] = replaced;
        out.join(" ")
    }
}

/// Swap two neighbouring words that normalize differently.
///
/// `options` must be the normalization the checker uses; a pair that only
/// differs in what the checker ignores (case, accents) is never swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjacentSwap {
    pub options: NormalizeOptions,
}

impl AdjacentSwap {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }
}

impl Corruption for AdjacentSwap {
    fn name(&self) -> &'static str {
        "adjacent-swap"
    }

    fn corrupt(&self, chunk: &str, rng: &mut dyn RngCore) -> String {
        let mut words: Vec<&str> = chunk.split_whitespace().collect();
        let normalized: Vec<Option<String>> = words
            .iter()
            .map(|w| normalize_word(w, &self.options))
            .collect();

        let candidates: Vec<usize> = (0..words.len().saturating_sub(1))
            .filter(|&i| match (&normalized[i], &normalized[i + 1]) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            })
            .collect();
        if candidates.is_empty() {
            return chunk.to_string();
        }

        let index = candidates[rng.random_range(0..candidates.len())];
        words.swap(index, index + 1);
        words.join(" ")
    }
}

/// Indices of words containing at least one alphanumeric character.
fn word_bearing(words: &[&str]) -> Vec<usize> {
    words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.chars().any(char::is_alphanumeric))
        .map(|(i, _)| i)
        .collect()
}

/// Substitute the first alphanumeric character so the word normalizes differently.
fn mutate_word(word: &str) -> String {
    let mut done = false;
    word.chars()
        .map(|c| {
            if done || !c.is_alphanumeric() {
                return c;
            }
            done = true;
            if c.to_lowercase().eq(['q']) {
                'z'
            } else {
                'q'
            }
        })
        .collect()
}
