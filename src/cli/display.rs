// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the verbatim CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. Colors are
//! dropped entirely when stdout is not a TTY or `NO_COLOR` is set, so piped
//! output stays plain.
//!
//! # Theme detection order
//!
//! 1. `VERBATIM_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use verbatim::{BatchReport, Diagnostic, Verdict};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    let explicit = std::env::var("VERBATIM_THEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();
    theme_from(explicit.as_deref(), colorfgbg.as_deref())
}

fn theme_from(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg" where bg 7 or 15 means a light background (8 is dark gray)
    if let Some(bg) = colorfgbg.and_then(|v| v.split(';').next_back()) {
        if let Ok(bg) = bg.parse::<u8>() {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors only on a TTY, and never when `NO_COLOR` is set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ANSI escapes excluded
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Shorten `text` to at most `max` chars, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Collapse runs of whitespace so a chunk fits on one row.
pub fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Escape sequences for a border color and its reset, both empty without colors.
fn border_style(color_fn: fn() -> String) -> (String, &'static str) {
    border_style_for(use_colors(), color_fn)
}

fn border_style_for(enabled: bool, color_fn: fn() -> String) -> (String, &'static str) {
    if enabled {
        (color_fn(), RESET)
    } else {
        (String::new(), "")
    }
}

/// │ content          │
pub fn row(content: &str) {
    let (border, reset) = border_style(GRAY);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset,
        content,
        " ".repeat(pad),
        border,
        reset
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (border, reset) = border_style(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset,
        label_part,
        border,
        "─".repeat(remaining),
        reset
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let (border, reset) = border_style(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        reset,
        label_part,
        border,
        "─".repeat(remaining),
        reset
    );
}

/// └──────────────────┘
pub fn section_bot() {
    let (border, reset) = border_style(GRAY);
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), reset);
}

/// ╔═══ centered title ═══╗
pub fn title(text: &str) {
    let (border, reset) = border_style(BLUE);
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    println!("{}╔{}╗{}", border, "═".repeat(BOX_WIDTH), reset);
    println!(
        "{}║{}{}{}{}{}║{}",
        border,
        reset,
        " ".repeat(left_pad),
        colored,
        " ".repeat(total_pad - left_pad),
        border,
        reset
    );
    println!("{}╚{}╝{}", border, "═".repeat(BOX_WIDTH), reset);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn verdict_badge(valid: bool) -> String {
    if valid {
        themed(GREEN, &[BOLD], "✓ VALID")
    } else {
        themed(RED, &[BOLD], "✗ REJECTED")
    }
}

/// `n/total`, green when complete, yellow when partial, red when zero.
pub fn ratio_colored(n: usize, total: usize) -> String {
    let text = format!("{}/{}", n, total);
    if n == total {
        themed(GREEN, &[BOLD], &text)
    } else if n == 0 {
        themed(RED, &[BOLD], &text)
    } else {
        themed(YELLOW, &[BOLD], &text)
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Elapsed milliseconds, green under 5ms, yellow under 50ms, red otherwise.
pub fn timing_ms(value: f64) -> String {
    let text = format!("{:.3} ms", value);
    if value < 5.0 {
        themed(GREEN, &[], &text)
    } else if value < 50.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

/// One-line explanation of a rejection.
pub fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    let matched = ratio_colored(diagnostic.longest_prefix, diagnostic.chunk_len);
    let divergence = match &diagnostic.divergence {
        Some(d) => {
            let found = match &d.document_word {
                Some(word) => format!("'{}'", word),
                None => "end of document".to_string(),
            };
            format!(
                "; token {} '{}' vs {}",
                d.chunk_index,
                themed(YELLOW, &[], &d.chunk_word),
                found
            )
        }
        None => String::new(),
    };
    format!(
        "matched {} at document token {}{}",
        matched, diagnostic.best_offset, divergence
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Print a single-chunk verdict. Rejection details only when `explain` is set.
pub fn print_verdict(verdict: &Verdict, byte_range: Option<(usize, usize)>, explain: bool) {
    match (&verdict.excerpt, byte_range) {
        (Some(excerpt), Some((start, end))) => println!(
            "{}  tokens {}..{}, bytes {}..{}",
            verdict_badge(true),
            excerpt.start(),
            excerpt.end(),
            start,
            end
        ),
        (Some(excerpt), None) => println!(
            "{}  tokens {}..{}",
            verdict_badge(verdict.valid),
            excerpt.start(),
            excerpt.end()
        ),
        (None, _) => println!("{}", verdict_badge(verdict.valid)),
    }

    if explain {
        if let Some(diagnostic) = &verdict.diagnostic {
            println!("  {}", diagnostic_line(diagnostic));
        }
    }
}

/// Print a boxed batch report: totals, then one row per rejected chunk.
pub fn print_batch(report: &BatchReport, chunks: &[String], elapsed_ms: f64, explain: bool) {
    section_top("BATCH");
    row(&format!(
        "  accepted {}   rejected {}   in {}",
        ratio_colored(report.valid_count(), report.len()),
        report.len() - report.valid_count(),
        timing_ms(elapsed_ms)
    ));

    let rejected = report.invalid_indices();
    if !rejected.is_empty() {
        section_mid("REJECTED");
        for index in rejected {
            let preview = truncate(&one_line(&chunks[index]), BOX_WIDTH - 12);
            row(&format!("  {} {}", pad_right(&format!("#{}", index), 6), preview));
            if explain {
                if let Some(diagnostic) = &report.verdicts[index].diagnostic {
                    row(&format!("         {}", diagnostic_line(diagnostic)));
                }
            }
        }
    }
    section_bot();
}
