// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunk-fidelity checks over raw text.
//!
//! `FidelityChecker` ties the tokenizer and the matcher together under one
//! `MatchConfig`. Documents that are checked against many chunks should be
//! tokenized once with [`FidelityChecker::prepare`]; the prepared document is
//! immutable and can be shared across threads.

use crate::config::MatchConfig;
use crate::matcher;
use crate::tokenize::tokenize;
use crate::types::{Token, Verdict};

/// A document tokenized under a fixed normalization policy.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    tokens: Vec<Token>,
}

impl PreparedDocument {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FidelityChecker {
    config: MatchConfig,
}

impl FidelityChecker {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Tokenize a document for repeated checks.
    pub fn prepare(&self, document: &str) -> PreparedDocument {
        PreparedDocument {
            tokens: tokenize(document, &self.config.normalize),
        }
    }

    /// Check one chunk against one raw document.
    pub fn check(&self, chunk: &str, document: &str) -> Verdict {
        self.check_prepared(chunk, &self.prepare(document))
    }

    /// Check one chunk against a document prepared by this checker.
    pub fn check_prepared(&self, chunk: &str, document: &PreparedDocument) -> Verdict {
        let chunk_tokens = tokenize(chunk, &self.config.normalize);
        if chunk_tokens.is_empty() {
            log::debug!("chunk has no word tokens; accepting as vacuous match");
        }
        matcher::validate(&chunk_tokens, document.tokens(), self.config.mode)
    }
}

/// Is `chunk` a verbatim excerpt of `document`?
///
/// Uses the default configuration: contiguous matching, case-insensitive,
/// edge punctuation ignored. With `verbose`, the verdict and, for rejected
/// chunks, the diagnostic are logged.
pub fn check_chunk_fidelity(chunk: &str, document: &str, verbose: bool) -> bool {
    let verdict = FidelityChecker::default().check(chunk, document);

    if verbose {
        match (&verdict.excerpt, &verdict.diagnostic) {
            (Some(excerpt), _) => log::debug!(
                "chunk accepted: document tokens {}..{}",
                excerpt.start(),
                excerpt.end()
            ),
            (None, Some(diagnostic)) => log::info!("chunk rejected: {}", diagnostic),
            (None, None) => log::info!("chunk rejected"),
        }
    }

    verdict.valid
}
