//! Exit codes and output of the `verbatim` binary.

use super::common::{write_file, MAMMOTHS, MAMMOTHS_EXCERPT};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_verbatim(args: &[&str]) -> Output {
    run_verbatim_with_env(args, &[])
}

fn run_verbatim_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_verbatim"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("VERBATIM_MODE")
        .env_remove("VERBATIM_CASE_SENSITIVE")
        .env_remove("VERBATIM_FOLD_DIACRITICS")
        .envs(vars.iter().copied())
        .output()
        .expect("failed to run verbatim")
}

fn fixture(chunk: &str) -> (TempDir, String, String) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    write_file(dir.path(), "document.txt", MAMMOTHS);
    write_file(dir.path(), "chunk.txt", chunk);
    let document = dir.path().join("document.txt").display().to_string();
    let chunk = dir.path().join("chunk.txt").display().to_string();
    (dir, document, chunk)
}

#[test]
fn test_check_valid_exits_zero() {
    let (_dir, document, chunk) = fixture(MAMMOTHS_EXCERPT);
    let output = run_verbatim(&["check", "--document", &document, "--chunk", &chunk]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("VALID"));
}

#[test]
fn test_check_rejected_exits_one_with_diagnostic() {
    let (_dir, document, chunk) = fixture("Giants of Ice Age");
    let output = run_verbatim(&["check", "--document", &document, "--chunk", &chunk, "--verbose"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("REJECTED"), "{}", stdout);
    assert!(stdout.contains("matched 2/4"), "{}", stdout);
}

#[test]
fn test_check_subsequence_mode_flag() {
    let (_dir, document, chunk) = fixture("Giants of Ice Age");
    let output = run_verbatim(&[
        "check", "--document", &document, "--chunk", &chunk, "--mode", "subsequence",
    ]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_missing_file_exits_two() {
    let output = run_verbatim(&["check", "--document", "/nonexistent/doc.txt", "--chunk", "/nonexistent/c.txt"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_batch_json_summary() {
    let (dir, document, _chunk) = fixture("");
    let chunks = serde_json::to_string(&[MAMMOTHS_EXCERPT, "Giants of Ice Age"]).expect("serializes");
    write_file(dir.path(), "chunks.json", &chunks);
    let chunks_path = dir.path().join("chunks.json").display().to_string();

    let output = run_verbatim(&["batch", "--document", &document, "--chunks", &chunks_path, "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["invalid"], serde_json::json!([1]));
}

#[test]
fn test_chunk_command_emits_json_array() {
    let (_dir, document, _chunk) = fixture("");
    let output = run_verbatim(&["chunk", "--document", &document, "--size", "48"]);
    assert_eq!(output.status.code(), Some(0));

    let chunks: Vec<String> = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(chunks, vec!["Mammoths – Giants of the Ice Age (3 ed.).", "With some extra words here."]);
}

#[test]
fn test_audit_synthetic_documents_pass() {
    let output = run_verbatim(&["audit", "--documents", "2", "--seed", "3"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "{}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_audit_small_chunks_pass() {
    let output = run_verbatim(&["audit", "--documents", "5", "--size", "20", "--seed", "1"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "{}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_audit_report_is_plain_without_colors() {
    let output = run_verbatim(&["audit", "--documents", "1", "--seed", "5"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('┌'), "{}", stdout);
    assert!(!stdout.contains('\x1b'), "{:?}", stdout);
}

#[test]
fn test_config_file_then_env_then_flag() {
    let (dir, document, chunk) = fixture("Giants of Ice Age");
    write_file(dir.path(), "verbatim.json", r#"{"mode": "subsequence"}"#);
    let config = dir.path().join("verbatim.json").display().to_string();
    let args: [&str; 7] = ["check", "--document", &document, "--chunk", &chunk, "--config", &config];

    let output = run_verbatim(&args);
    assert_eq!(output.status.code(), Some(0), "config file selects subsequence");

    let output = run_verbatim_with_env(&args, &[("VERBATIM_MODE", "contiguous")]);
    assert_eq!(output.status.code(), Some(1), "environment overrides the file");

    let mut with_flag = args.to_vec();
    with_flag.extend(["--mode", "subsequence"]);
    let output = run_verbatim_with_env(&with_flag, &[("VERBATIM_MODE", "contiguous")]);
    assert_eq!(output.status.code(), Some(0), "--mode overrides the environment");
}
