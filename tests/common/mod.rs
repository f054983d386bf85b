//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::Path;
use verbatim::{tokenize, Chunker, DocumentSource, NormalizeOptions, SentenceChunker, SyntheticSource};

/// The punctuation-heavy fixture used throughout.
pub const MAMMOTHS: &str = "Mammoths – Giants of the Ice Age (3 ed.). With some extra words here.";

/// Excerpt of [`MAMMOTHS`] that keeps its parenthetical and trailing period.
pub const MAMMOTHS_EXCERPT: &str = "Giants of the Ice Age (3 ed.).";

/// Normalized token strings of `text` under default options.
pub fn words(text: &str) -> Vec<String> {
    tokenize(text, &NormalizeOptions::default())
        .into_iter()
        .map(|t| t.text)
        .collect()
}

/// Brute-force reference for the contiguous scan.
pub fn naive_find(chunk: &[String], document: &[String]) -> Option<usize> {
    if chunk.is_empty() {
        return Some(0);
    }
    if chunk.len() > document.len() {
        return None;
    }
    document.windows(chunk.len()).position(|w| w == chunk)
}

/// Longest chunk prefix found anywhere in the document, by brute force.
pub fn naive_longest_prefix(chunk: &[String], document: &[String]) -> usize {
    (0..=document.len())
        .map(|s| {
            chunk
                .iter()
                .zip(&document[s..])
                .take_while(|(c, d)| c == d)
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// First synthetic document for `seed`.
pub fn synthetic_document(seed: u64) -> String {
    SyntheticSource::new(seed)
        .next_document()
        .expect("synthetic source never runs dry")
        .text
}

/// Reference chunks of `text` at the default 4096-byte limit, as owned strings.
pub fn reference_chunks(text: &str) -> Vec<String> {
    SentenceChunker::default()
        .chunk(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Write `content` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write fixture file");
}
