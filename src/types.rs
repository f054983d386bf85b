// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core types for chunk-fidelity validation.
//!
//! Everything here is transient: a `Document` is read, tokenized into `Token`s,
//! and a `Verdict` comes back. Nothing is persisted and nothing is mutated after
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::verify::Excerpt;

/// A source document: an identifier plus its full raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A normalized word and the byte range of its core in the raw text.
///
/// `start..end` covers the word with surrounding punctuation trimmed, so
/// `&raw[start..end]` is always a valid slice of the text it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// How the chunk token sequence has to appear in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Chunk tokens must appear as one unbroken run, word for word.
    #[default]
    Contiguous,
    /// Chunk tokens must appear in order; the document may have words in between.
    Subsequence,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contiguous" | "exact" => Ok(MatchMode::Contiguous),
            "subsequence" | "ordered" => Ok(MatchMode::Subsequence),
            other => Err(format!(
                "unknown match mode '{}' (expected 'contiguous' or 'subsequence')",
                other
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Contiguous => write!(f, "contiguous"),
            MatchMode::Subsequence => write!(f, "subsequence"),
        }
    }
}

/// The first place a rejected chunk stops lining up with the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divergence {
    /// Index into the chunk token sequence.
    pub chunk_index: usize,
    pub chunk_word: String,
    /// Document token the chunk word was compared against, `None` if the
    /// document ran out first.
    pub document_word: Option<String>,
}

/// Explanation attached to a rejected chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub chunk_len: usize,
    pub document_len: usize,
    /// Longest chunk prefix found anywhere in the document.
    pub longest_prefix: usize,
    /// Document token offset where that prefix begins.
    pub best_offset: usize,
    pub divergence: Option<Divergence>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matched {}/{} chunk tokens at document token {}",
            self.longest_prefix, self.chunk_len, self.best_offset
        )?;
        if let Some(div) = &self.divergence {
            match &div.document_word {
                Some(found) => write!(
                    f,
                    "; chunk token {} '{}' != document '{}'",
                    div.chunk_index, div.chunk_word, found
                )?,
                None => write!(
                    f,
                    "; chunk token {} '{}' past end of document ({} tokens)",
                    div.chunk_index, div.chunk_word, self.document_len
                )?,
            }
        }
        Ok(())
    }
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    /// Where the chunk was found. Present iff `valid`.
    pub excerpt: Option<Excerpt>,
    /// Why the chunk was rejected. Present iff `!valid`.
    pub diagnostic: Option<Diagnostic>,
}

impl Verdict {
    pub fn accepted(excerpt: Excerpt) -> Self {
        Self {
            valid: true,
            excerpt: Some(excerpt),
            diagnostic: None,
        }
    }

    pub fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            valid: false,
            excerpt: None,
            diagnostic: Some(diagnostic),
        }
    }
}
