// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the verbatim command-line interface.
//!
//! Five subcommands: `check` validates one chunk, `batch` validates a JSON list
//! of chunks against one document, `chunk` produces reference chunks for a
//! document, `tokens` shows what the tokenizer sees, and `audit` runs the whole
//! loop (chunk, validate, corrupt, validate again) over a directory or over
//! seeded synthetic documents.

pub mod display;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use verbatim::{MatchMode, SentenceChunker};

#[derive(Parser)]
#[command(
    name = "verbatim",
    about = "Check that text chunks are verbatim excerpts of their source documents",
    version
)]
pub struct Cli {
    /// Show diagnostics and raise log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Match configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Match mode: contiguous (default) or subsequence
    #[arg(long, global = true)]
    pub mode: Option<MatchMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one chunk against one document (exit 1 if rejected)
    Check {
        /// Path to the source document
        #[arg(short, long)]
        document: PathBuf,

        /// Path to the chunk text
        #[arg(short, long)]
        chunk: PathBuf,
    },

    /// Validate a JSON array of chunk strings against one document
    Batch {
        /// Path to the source document
        #[arg(short, long)]
        document: PathBuf,

        /// Path to a JSON file holding an array of chunk strings
        #[arg(short, long)]
        chunks: PathBuf,

        /// Print a JSON summary instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Split a document into reference chunks, printed as a JSON array
    Chunk {
        /// Path to the source document
        #[arg(short, long)]
        document: PathBuf,

        /// Maximum chunk size in bytes
        #[arg(short, long, default_value_t = SentenceChunker::DEFAULT_MAX_LEN)]
        size: usize,
    },

    /// Print the normalized token sequence of a file
    Tokens {
        /// Path to a text file
        file: PathBuf,
    },

    /// Chunk documents, validate every chunk, then check corrupted chunks are rejected
    Audit {
        /// Directory of .txt / .json documents (synthetic documents if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of synthetic documents to generate when no input is given
        #[arg(long, default_value = "3")]
        documents: usize,

        /// Maximum chunk size in bytes
        #[arg(short, long, default_value_t = SentenceChunker::DEFAULT_MAX_LEN)]
        size: usize,

        /// Seed for synthetic documents and corruption choices
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}
