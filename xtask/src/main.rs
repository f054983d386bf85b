//! Custom cargo commands for the verbatim crate.
//!
//! Usage:
//!   cargo xtask check     - cargo check + tests + clippy
//!   cargo xtask test      - Run all tests (default and no-default features)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz      - Run every fuzz target for a short time
//!   cargo xtask audit     - Run the CLI audit over synthetic documents

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Seconds each fuzz target runs under `cargo xtask fuzz`.
const FUZZ_SECONDS: u32 = 30;

const FUZZ_TARGETS: &[&str] = &["tokenize_offsets", "kmp_vs_naive", "excerpt_roundtrip"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("check") => check()?,
        Some("test") => test()?,
        Some("bench") => bench()?,
        Some("fuzz") => fuzz()?,
        Some("audit") => audit()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  check     Quick check (cargo check + test + clippy)
  test      Run all Rust tests, with and without default features
  bench     Run benchmarks
  fuzz      Run each fuzz target for {FUZZ_SECONDS}s (needs cargo-fuzz, nightly)
  audit     Chunk, validate and corrupt synthetic documents through the CLI
"#
    );
}

fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test"])?;
    // Sequential batch path and the no-normalization tokenizer
    run_cargo(&["test", "--no-default-features"])
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

fn fuzz() -> Result<()> {
    let max_time = format!("-max_total_time={}", FUZZ_SECONDS);
    for (i, target) in FUZZ_TARGETS.iter().enumerate() {
        println!("[{}/{}] fuzzing {}...", i + 1, FUZZ_TARGETS.len(), target);
        run_cargo(&["+nightly", "fuzz", "run", target, "--", &max_time])?;
    }
    println!("\n✓ No fuzz failures");
    Ok(())
}

fn audit() -> Result<()> {
    run_cargo(&[
        "run", "--release", "--quiet", "--", "audit", "--documents", "10", "--seed", "0",
    ])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("No working directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
