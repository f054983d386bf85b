// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunk-fidelity validation.
//!
//! Given a candidate chunk and its claimed source document, decide whether the
//! chunk is a verbatim excerpt: every word present, in order, with nothing
//! dropped, inserted, swapped or altered. Formatting noise (case, punctuation
//! hugging words, whitespace, Unicode composition) is normalized away first.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ tokenize.rs  │────▶│  matcher.rs  │────▶│ fidelity.rs  │
//! │ (normalize,  │     │ (KMP scan,   │     │ (checker,    │
//! │  byte spans) │     │  diagnostic) │     │  prepared    │
//! └──────────────┘     └──────────────┘     │  documents)  │
//!                             │             └──────────────┘
//!                             ▼                    │
//! ┌─────────────────────────────────────┐          ▼
//! │              verify/                │   ┌──────────────┐
//! │  (Excerpt evidence, debug contracts)│   │   batch.rs   │
//! └─────────────────────────────────────┘   │   (rayon)    │
//!                                           └──────────────┘
//! ```
//!
//! `source`, `chunker` and `corrupt` produce documents, reference chunks and
//! deliberately broken chunks for evaluation runs and tests.
//!
//! # Usage
//!
//! ```
//! use verbatim::check_chunk_fidelity;
//!
//! let document = "Mammoths – Giants of the Ice Age (3 ed.). With some extra words here.";
//! assert!(check_chunk_fidelity("Giants of the Ice Age (3 ed.).", document, false));
//! assert!(!check_chunk_fidelity("Giants of Ice Age", document, false));
//! ```

pub mod batch;
pub mod chunker;
pub mod config;
pub mod corrupt;
pub mod fidelity;
pub mod matcher;
pub mod source;
pub mod tokenize;
mod types;
pub mod verify;

pub use batch::{validate_batch, BatchReport, BatchSummary};
#[cfg(feature = "parallel")]
pub use batch::validate_batch_with_progress;
pub use chunker::{Chunker, SentenceChunker};
pub use config::{ConfigError, MatchConfig};
pub use corrupt::{AdjacentSwap, Corruption, WordDeletion, WordSubstitution};
pub use fidelity::{check_chunk_fidelity, FidelityChecker, PreparedDocument};
pub use matcher::{find_contiguous, longest_prefix, occurs_naive, validate};
pub use source::{DirectorySource, DocumentSource, SourceError, SyntheticSource};
pub use tokenize::{normalize_word, tokenize, NormalizeOptions};
pub use types::{Diagnostic, Divergence, Document, MatchMode, Token, Verdict};
pub use verify::{Excerpt, InvariantError};
