// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type wrappers that make unproven matches unrepresentable.
//!
//! An `Excerpt` can only be obtained by checking, token by token, that the
//! chunk occurs at the claimed document range. The check is paid once when the
//! verdict is built; afterwards the excerpt is evidence, not a claim.
//!
//! | Type      | Guarantee                                                  |
//! |-----------|------------------------------------------------------------|
//! | `Excerpt` | `start <= end <= document.len()`, chunk tokens match there |
//!
//! # Example
//!
//! ```ignore
//! let excerpt = Excerpt::contiguous(&chunk, &document, 4)?;
//! let raw = &document_text[excerpt.byte_range(&document).unwrap()];
//! ```

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Claimed range runs past the end of the document.
    OutOfBounds {
        start: usize,
        len: usize,
        document_len: usize,
    },
    /// Chunk token differs from the document token at the claimed position.
    TokenMismatch {
        chunk_index: usize,
        document_index: usize,
    },
    /// Subsequence positions are not strictly increasing.
    PositionsNotIncreasing { index: usize },
    /// Number of subsequence positions differs from the chunk length.
    PositionCountMismatch { positions: usize, chunk_len: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::OutOfBounds {
                start,
                len,
                document_len,
            } => {
                write!(
                    f,
                    "excerpt {}..{} exceeds document length {}",
                    start,
                    start + len,
                    document_len
                )
            }
            InvariantError::TokenMismatch {
                chunk_index,
                document_index,
            } => {
                write!(
                    f,
                    "chunk token {} does not equal document token {}",
                    chunk_index, document_index
                )
            }
            InvariantError::PositionsNotIncreasing { index } => {
                write!(f, "subsequence positions not increasing at {}", index)
            }
            InvariantError::PositionCountMismatch {
                positions,
                chunk_len,
            } => {
                write!(
                    f,
                    "{} subsequence positions for {} chunk tokens",
                    positions, chunk_len
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Document token range `[start, end)` proven to contain the chunk.
///
/// For a contiguous match `end - start == chunk.len()`. For a subsequence match
/// the range spans from the first to the last matched document token.
///
/// # Invariants (enforced at construction)
/// - `start <= end <= document.len()`
/// - every chunk token equals the document token it was matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    start: usize,
    end: usize,
}

impl Excerpt {
    /// Prove that `chunk` occurs word for word at `document[start..]`.
    pub fn contiguous<C, D>(chunk: &[C], document: &[D], start: usize) -> Result<Self, InvariantError>
    where
        C: AsRef<str>,
        D: AsRef<str>,
    {
        let end = start
            .checked_add(chunk.len())
            .filter(|end| *end <= document.len())
            .ok_or(InvariantError::OutOfBounds {
                start,
                len: chunk.len(),
                document_len: document.len(),
            })?;

        for (i, token) in chunk.iter().enumerate() {
            if token.as_ref() != document[start + i].as_ref() {
                return Err(InvariantError::TokenMismatch {
                    chunk_index: i,
                    document_index: start + i,
                });
            }
        }

        Ok(Self { start, end })
    }

    /// Prove that `chunk[i] == document[positions[i]]` with increasing positions.
    pub fn from_positions<C, D>(
        chunk: &[C],
        document: &[D],
        positions: &[usize],
    ) -> Result<Self, InvariantError>
    where
        C: AsRef<str>,
        D: AsRef<str>,
    {
        if positions.len() != chunk.len() {
            return Err(InvariantError::PositionCountMismatch {
                positions: positions.len(),
                chunk_len: chunk.len(),
            });
        }
        if positions.is_empty() {
            return Ok(Self { start: 0, end: 0 });
        }

        for (i, (&pos, token)) in positions.iter().zip(chunk).enumerate() {
            if i > 0 && pos <= positions[i - 1] {
                return Err(InvariantError::PositionsNotIncreasing { index: i });
            }
            let Some(doc_token) = document.get(pos) else {
                return Err(InvariantError::OutOfBounds {
                    start: pos,
                    len: 1,
                    document_len: document.len(),
                });
            };
            if token.as_ref() != doc_token.as_ref() {
                return Err(InvariantError::TokenMismatch {
                    chunk_index: i,
                    document_index: pos,
                });
            }
        }

        Ok(Self {
            start: positions[0],
            end: positions[positions.len() - 1] + 1,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of document tokens covered.
    pub fn token_len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Byte range in the raw document text, `None` for an empty excerpt.
    pub fn byte_range(&self, document: &[crate::Token]) -> Option<Range<usize>> {
        if self.is_empty() {
            return None;
        }
        let first = document.get(self.start)?;
        let last = document.get(self.end - 1)?;
        Some(first.start..last.end)
    }
}
