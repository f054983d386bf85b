// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use verbatim::{
    occurs_naive, tokenize, validate_batch, AdjacentSwap, Chunker, Corruption, DirectorySource,
    DocumentSource, FidelityChecker, MatchConfig, SentenceChunker, SyntheticSource, WordDeletion,
    WordSubstitution,
};

mod cli;
use cli::display::{self, row, section_bot, section_mid, section_top, title};
use cli::{Cli, Commands};

/// Process exit status: chunk(s) accepted, rejected, or the run itself failed.
const EXIT_VALID: u8 = 0;
const EXIT_REJECTED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::from(EXIT_VALID),
        Ok(false) => ExitCode::from(EXIT_REJECTED),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// `RUST_LOG` wins over `-v` when both are given.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Defaults, then the config file, then environment, then `--mode`.
fn load_config(cli: &Cli) -> Result<MatchConfig> {
    let base = match &cli.config {
        Some(path) => MatchConfig::from_json_file(path)?,
        None => MatchConfig::default(),
    };
    let mut config = base.with_env()?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    log::debug!("match config: {:?}", config);
    Ok(config)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Returns `Ok(false)` when something was rejected.
fn run(cli: &Cli) -> Result<bool> {
    let explain = cli.verbose > 0;

    match &cli.command {
        Commands::Check { document, chunk } => {
            let checker = FidelityChecker::new(load_config(cli)?);
            let document = read_text(document)?;
            let chunk = read_text(chunk)?;

            let prepared = checker.prepare(&document);
            let verdict = checker.check_prepared(&chunk, &prepared);
            let bytes = verdict
                .excerpt
                .and_then(|e| e.byte_range(prepared.tokens()))
                .map(|r| (r.start, r.end));
            display::print_verdict(&verdict, bytes, explain);
            Ok(verdict.valid)
        }

        Commands::Batch {
            document,
            chunks,
            json,
        } => {
            let checker = FidelityChecker::new(load_config(cli)?);
            let document = read_text(document)?;
            let chunks: Vec<String> = serde_json::from_str(&read_text(chunks)?)
                .context("Chunks file must be a JSON array of strings")?;

            let prepared = checker.prepare(&document);
            let started = Instant::now();
            let report = run_batch(&checker, &prepared, &chunks, *json);
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            if *json {
                println!("{}", serde_json::to_string_pretty(&report.summary())?);
            } else {
                display::print_batch(&report, &chunks, elapsed_ms, explain);
            }
            Ok(report.all_valid())
        }

        Commands::Chunk { document, size } => {
            let document = read_text(document)?;
            let chunks = SentenceChunker::new(*size).chunk(&document);
            log::info!("{} chunks of at most {} bytes", chunks.len(), size);
            println!("{}", serde_json::to_string_pretty(&chunks)?);
            Ok(true)
        }

        Commands::Tokens { file } => {
            let config = load_config(cli)?;
            let text = read_text(file)?;
            for token in tokenize(&text, &config.normalize) {
                println!("{}..{}\t{}", token.start, token.end, token.text);
            }
            Ok(true)
        }

        Commands::Audit {
            input,
            documents,
            size,
            seed,
        } => {
            let checker = FidelityChecker::new(load_config(cli)?);
            let source: Box<dyn DocumentSource> = match input {
                Some(dir) => Box::new(DirectorySource::open(dir)?),
                None => Box::new(SyntheticSource::new(*seed)),
            };
            let limit = if input.is_some() { usize::MAX } else { *documents };
            run_audit(&checker, source, limit, *size, *seed)
        }
    }
}

#[cfg(feature = "parallel")]
fn run_batch(
    checker: &FidelityChecker,
    prepared: &verbatim::PreparedDocument,
    chunks: &[String],
    quiet: bool,
) -> verbatim::BatchReport {
    use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

    let progress = ProgressBar::new(chunks.len() as u64);
    if quiet || !atty::is(atty::Stream::Stderr) {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} chunks") {
        progress.set_style(style);
    }
    let report = verbatim::validate_batch_with_progress(checker, prepared, chunks, &progress);
    progress.finish_and_clear();
    report
}

#[cfg(not(feature = "parallel"))]
fn run_batch(
    checker: &FidelityChecker,
    prepared: &verbatim::PreparedDocument,
    chunks: &[String],
    _quiet: bool,
) -> verbatim::BatchReport {
    validate_batch(checker, prepared, chunks)
}

/// Per-document tallies for the audit table.
struct AuditRow {
    id: String,
    bytes: usize,
    chunks: usize,
    accepted: usize,
    corruptions: usize,
    caught: usize,
    /// Corruptions where the checker and the brute-force reference disagree.
    disagreements: usize,
}

/// Chunk every document, require every reference chunk to pass, then corrupt
/// the first chunk with each strategy and require every change to be caught.
///
/// A corruption whose tokens still occur in the document (a deleted word can
/// leave a run that appears elsewhere) is a genuine excerpt; it is skipped
/// unless the checker rejects it.
fn run_audit(
    checker: &FidelityChecker,
    mut source: Box<dyn DocumentSource>,
    limit: usize,
    size: usize,
    seed: u64,
) -> Result<bool> {
    let chunker = SentenceChunker::new(size);
    let deletion = WordDeletion::default();
    let swap = AdjacentSwap::new(checker.config().normalize);
    let strategies: [&dyn Corruption; 3] = [&deletion, &WordSubstitution, &swap];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    while rows.len() < limit {
        let Some(document) = source.next_document() else {
            break;
        };
        let prepared = checker.prepare(&document.text);
        let chunks = chunker.chunk(&document.text);
        let report = validate_batch(checker, &prepared, &chunks);

        let mut corruptions = 0;
        let mut caught = 0;
        let mut disagreements = 0;
        if let Some(first) = chunks.first() {
            for strategy in strategies {
                let corrupted = strategy.corrupt(first, &mut rng);
                if corrupted == *first {
                    log::debug!("{}: {} had nothing to change", document.id, strategy.name());
                    continue;
                }

                let verdict = checker.check_prepared(&corrupted, &prepared);
                let tokens = tokenize(&corrupted, &checker.config().normalize);
                let genuine = occurs_naive(&tokens, prepared.tokens(), checker.config().mode);

                match (genuine, verdict.valid) {
                    (true, true) => log::debug!(
                        "{}: {} left a genuine excerpt; skipped",
                        document.id,
                        strategy.name()
                    ),
                    (true, false) => {
                        disagreements += 1;
                        log::warn!(
                            "{}: {} left a genuine excerpt but it was rejected",
                            document.id,
                            strategy.name()
                        );
                    }
                    (false, true) => {
                        corruptions += 1;
                        log::warn!("{}: {} corruption was accepted", document.id, strategy.name());
                    }
                    (false, false) => {
                        corruptions += 1;
                        caught += 1;
                    }
                }
            }
        }

        for index in report.invalid_indices() {
            log::warn!("{}: reference chunk {} rejected", document.id, index);
        }

        rows.push(AuditRow {
            bytes: document.text.len(),
            id: document.id,
            chunks: report.len(),
            accepted: report.valid_count(),
            corruptions,
            caught,
            disagreements,
        });
    }

    print_audit(&rows);
    Ok(rows
        .iter()
        .all(|r| r.accepted == r.chunks && r.caught == r.corruptions && r.disagreements == 0))
}

fn print_audit(rows: &[AuditRow]) {
    title("VERBATIM AUDIT");
    section_top("DOCUMENTS");
    row(&format!(
        "  {} {} {} {}",
        display::pad_right("document", 28),
        display::pad_right("size", 12),
        display::pad_right("reference", 14),
        "corruptions caught"
    ));
    for r in rows {
        row(&format!(
            "  {} {} {} {}",
            display::pad_right(&display::truncate(&r.id, 26), 28),
            display::pad_right(&display::format_size(r.bytes), 12),
            display::pad_right(&display::ratio_colored(r.accepted, r.chunks), 14),
            display::ratio_colored(r.caught, r.corruptions)
        ));
    }

    let chunks: usize = rows.iter().map(|r| r.chunks).sum();
    let accepted: usize = rows.iter().map(|r| r.accepted).sum();
    let corruptions: usize = rows.iter().map(|r| r.corruptions).sum();
    let caught: usize = rows.iter().map(|r| r.caught).sum();
    section_mid("TOTAL");
    row(&format!(
        "  {} documents   reference {} {}   corruptions caught {}",
        rows.len(),
        display::ratio_colored(accepted, chunks),
        display::verdict_badge(accepted == chunks),
        display::ratio_colored(caught, corruptions)
    ));
    section_bot();
}
