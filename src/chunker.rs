// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reference chunking.
//!
//! The reference chunker exists to produce chunks that are valid by
//! construction: every chunk is a trimmed slice of the input, never a rebuilt
//! string. Sentences are packed greedily up to the size limit; a sentence that
//! alone exceeds the limit is cut at whitespace.

/// Splits a document into chunk texts.
pub trait Chunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Packs whole sentences into chunks of at most `max_len` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceChunker {
    max_len: usize,
}

impl SentenceChunker {
    pub const DEFAULT_MAX_LEN: usize = 4096;

    /// A `max_len` of zero is treated as one.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LEN)
    }
}

impl Chunker for SentenceChunker {
    fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        let mut current: Option<(usize, usize)> = None;

        for (start, end) in sentence_spans(text) {
            if end - start > self.max_len {
                if let Some(span) = current.take() {
                    spans.push(span);
                }
                spans.extend(pack_words(text, start, end, self.max_len));
                continue;
            }

            current = match current {
                None => Some((start, end)),
                Some((cs, _)) if end - cs <= self.max_len => Some((cs, end)),
                Some(span) => {
                    spans.push(span);
                    Some((start, end))
                }
            };
        }
        if let Some(span) = current {
            spans.push(span);
        }

        spans
            .into_iter()
            .map(|(s, e)| text[s..e].trim())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }
}

/// Byte spans of sentences, leading whitespace excluded.
///
/// A sentence ends after `.`, `!` or `?` followed by whitespace, or at the end
/// of the text.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if start.is_none() {
            if c.is_whitespace() {
                continue;
            }
            start = Some(i);
        }

        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary {
            if let Some(s) = start.take() {
                spans.push((s, i + c.len_utf8()));
            }
        }
    }
    if let Some(s) = start {
        spans.push((s, text.trim_end().len()));
    }

    spans
}

/// Cut `text[start..end]` at whitespace into pieces of at most `max_len` bytes.
/// A single word longer than `max_len` becomes its own piece.
fn pack_words(text: &str, start: usize, end: usize, max_len: usize) -> Vec<(usize, usize)> {
    let mut pieces = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (ws, we) in word_spans(&text[start..end]) {
        let (ws, we) = (start + ws, start + we);
        current = match current {
            None => Some((ws, we)),
            Some((cs, _)) if we - cs <= max_len => Some((cs, we)),
            Some(span) => {
                pieces.push(span);
                Some((ws, we))
            }
        };
    }
    if let Some(span) = current {
        pieces.push(span);
    }

    pieces
}

fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }

    spans
}
