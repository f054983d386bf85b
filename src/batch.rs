// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Validate many chunks against one document.
//!
//! Each check only reads the prepared document, so chunks are embarrassingly
//! parallel. With the `parallel` feature the work goes through rayon; without
//! it the same code runs sequentially. Verdicts always come back in input order.

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::fidelity::{FidelityChecker, PreparedDocument};
use crate::types::Verdict;

/// Per-chunk results of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub verdicts: Vec<Verdict>,
}

/// Compact form of a `BatchReport` for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: Vec<usize>,
    pub all_valid: bool,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn valid_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.valid).count()
    }

    /// Indices of rejected chunks, ascending.
    pub fn invalid_indices(&self) -> Vec<usize> {
        self.verdicts
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.valid)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn all_valid(&self) -> bool {
        self.verdicts.iter().all(|v| v.valid)
    }

    /// Verdicts as plain booleans, in input order.
    pub fn flags(&self) -> Vec<bool> {
        self.verdicts.iter().map(|v| v.valid).collect()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.len(),
            valid: self.valid_count(),
            invalid: self.invalid_indices(),
            all_valid: self.all_valid(),
        }
    }
}

/// Validate `chunks` against `document`.
#[cfg(feature = "parallel")]
pub fn validate_batch<S>(
    checker: &FidelityChecker,
    document: &PreparedDocument,
    chunks: &[S],
) -> BatchReport
where
    S: AsRef<str> + Sync,
{
    let verdicts = chunks
        .par_iter()
        .map(|chunk| checker.check_prepared(chunk.as_ref(), document))
        .collect();
    finish(verdicts)
}

/// Validate `chunks` against `document`.
#[cfg(not(feature = "parallel"))]
pub fn validate_batch<S>(
    checker: &FidelityChecker,
    document: &PreparedDocument,
    chunks: &[S],
) -> BatchReport
where
    S: AsRef<str> + Sync,
{
    let verdicts = chunks
        .iter()
        .map(|chunk| checker.check_prepared(chunk.as_ref(), document))
        .collect();
    finish(verdicts)
}

/// Like [`validate_batch`], ticking `progress` once per finished chunk.
#[cfg(feature = "parallel")]
pub fn validate_batch_with_progress<S>(
    checker: &FidelityChecker,
    document: &PreparedDocument,
    chunks: &[S],
    progress: &ProgressBar,
) -> BatchReport
where
    S: AsRef<str> + Sync,
{
    let verdicts = chunks
        .par_iter()
        .map(|chunk| {
            let verdict = checker.check_prepared(chunk.as_ref(), document);
            progress.inc(1);
            verdict
        })
        .collect();
    finish(verdicts)
}

fn finish(verdicts: Vec<Verdict>) -> BatchReport {
    let report = BatchReport { verdicts };
    log::debug!(
        "batch validated: {}/{} chunks accepted",
        report.valid_count(),
        report.len()
    );
    report
}
