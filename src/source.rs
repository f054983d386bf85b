// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where documents come from.
//!
//! The checker itself only needs text. For evaluation runs there are two
//! sources: a directory of files on disk, and a seeded synthetic generator
//! whose output is reproducible from its seed alone.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::types::Document;

/// Anything that can hand out documents to validate against.
pub trait DocumentSource {
    /// Next document, or `None` when the source is exhausted.
    fn next_document(&mut self) -> Option<Document>;
}

/// Error type for loading documents from disk.
#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: std::io::Error },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            SourceError::Json { path, source } => {
                write!(f, "invalid document JSON {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            SourceError::Json { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// DIRECTORY SOURCE
// ============================================================================

/// Documents loaded from a directory.
///
/// `.txt` files become a document whose id is the file stem. `.json` files must
/// hold `{"id": ..., "text": ...}`. Other files are ignored. Documents are
/// yielded in file-name order.
#[derive(Debug)]
pub struct DirectorySource {
    documents: VecDeque<Document>,
}

impl DirectorySource {
    /// Load every document in `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && document_kind(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let documents = load_all(&paths)?;
        log::debug!("loaded {} documents from {}", documents.len(), dir.display());

        Ok(Self {
            documents: documents.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for DirectorySource {
    fn next_document(&mut self) -> Option<Document> {
        self.documents.pop_front()
    }
}

#[derive(Clone, Copy)]
enum DocumentKind {
    Text,
    Json,
}

fn document_kind(path: &Path) -> Option<DocumentKind> {
    match path.extension()?.to_str()? {
        "txt" => Some(DocumentKind::Text),
        "json" => Some(DocumentKind::Json),
        _ => None,
    }
}

#[cfg(feature = "parallel")]
fn load_all(paths: &[PathBuf]) -> Result<Vec<Document>, SourceError> {
    paths.par_iter().map(|p| load_document(p)).collect()
}

#[cfg(not(feature = "parallel"))]
fn load_all(paths: &[PathBuf]) -> Result<Vec<Document>, SourceError> {
    paths.iter().map(|p| load_document(p)).collect()
}

fn load_document(path: &Path) -> Result<Document, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match document_kind(path) {
        Some(DocumentKind::Json) => {
            serde_json::from_str(&content).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(Document::new(id, content))
        }
    }
}

// ============================================================================
// SYNTHETIC SOURCE
// ============================================================================

/// Encyclopedic vocabulary for synthetic prose.
const VOCABULARY: &[&str] = &[
    "mammoth", "glacier", "tundra", "species", "herd", "migration", "climate", "ancient",
    "fossil", "record", "region", "northern", "winter", "steppe", "grass", "river",
    "valley", "population", "evidence", "period", "animals", "large", "early", "later",
    "during", "across", "between", "several", "remains", "discovered", "studied", "found",
    "changes", "habitat", "hunters", "tools", "settlement", "coast", "island", "ice",
    "age", "warm", "cold", "thousand", "years", "century", "museum", "researchers",
    "described", "shows", "suggests", "known", "from", "with", "into", "under",
    "the", "of", "and", "in", "a", "to", "was", "were", "their", "its",
];

/// Seeded generator of encyclopedia-like documents.
///
/// Output depends only on the seed: two sources built with the same seed yield
/// identical document streams.
#[derive(Debug)]
pub struct SyntheticSource {
    rng: StdRng,
    sentences: Range<usize>,
    words_per_sentence: Range<usize>,
    generated: usize,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sentences: 96..192,
            words_per_sentence: 6..18,
            generated: 0,
        }
    }

    /// Number of sentences per document (half-open range). An empty range
    /// is widened to its start.
    pub fn with_sentences(mut self, sentences: Range<usize>) -> Self {
        self.sentences = non_empty(sentences);
        self
    }

    /// Words per sentence (half-open range). An empty range is widened to
    /// its start.
    pub fn with_words_per_sentence(mut self, words: Range<usize>) -> Self {
        self.words_per_sentence = non_empty(words);
        self
    }

    fn sentence(&mut self) -> String {
        let len = self.rng.random_range(self.words_per_sentence.clone()).max(1);
        let mut sentence = String::new();

        for i in 0..len {
            let word = VOCABULARY[self.rng.random_range(0..VOCABULARY.len())];
            if i == 0 {
                sentence.push_str(&capitalize(word));
            } else {
                sentence.push(' ');
                sentence.push_str(word);
            }
            if i + 1 < len && self.rng.random_range(0..10) == 0 {
                sentence.push(',');
            }
        }

        sentence.push(match self.rng.random_range(0..20) {
            0 => '!',
            1 => '?',
            _ => '.',
        });
        sentence
    }
}

impl DocumentSource for SyntheticSource {
    fn next_document(&mut self) -> Option<Document> {
        let count = self.rng.random_range(self.sentences.clone()).max(1);
        let mut text = String::new();

        for i in 0..count {
            if i > 0 {
                // Paragraph break roughly every six sentences
                if self.rng.random_range(0..6) == 0 {
                    text.push_str("\n\n");
                } else {
                    text.push(' ');
                }
            }
            let sentence = self.sentence();
            text.push_str(&sentence);
        }

        let id = format!("synthetic-{}", self.generated);
        self.generated += 1;
        Some(Document::new(id, text))
    }
}

/// `random_range` panics on an empty range.
fn non_empty(range: Range<usize>) -> Range<usize> {
    range.start..range.end.max(range.start + 1)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
