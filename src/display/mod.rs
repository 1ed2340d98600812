// Author: kelexine (https://github.com/kelexine)
// display.rs — Colored terminal output: status lines, report table, summary

use colored::*;
use std::fmt;

use crate::models::{FileLines, REFACTOR_THRESHOLD, SizeClass, Summary};

/// Refactoring candidates listed before collapsing into "... and N more".
const MAX_CANDIDATES: usize = 5;
const MIN_PATH_WIDTH: usize = 30;
const LINES_WIDTH: usize = 10;
const SIZE_WIDTH: usize = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn fmt_num(n: usize) -> String {
    // Thousands-separator formatting
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

fn colored_size(class: SizeClass) -> ColoredString {
    let cell = format!("{:^width$}", class.label(), width = SIZE_WIDTH);
    match class {
        SizeClass::Large => cell.red(),
        SizeClass::Medium => cell.yellow(),
        SizeClass::Small => cell.blue(),
        SizeClass::Tiny => cell.dimmed(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status lines
// ─────────────────────────────────────────────────────────────────────────────

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "Info:".blue(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

// ─────────────────────────────────────────────────────────────────────────────
// Report
// ─────────────────────────────────────────────────────────────────────────────

/// Print the table, summary and refactoring candidates for `rows`, which
/// must be sorted largest first.
pub fn display_report(rows: &[&FileLines]) {
    if rows.is_empty() {
        println!("{}", "No code files found.".yellow());
        return;
    }

    println!();
    for line in table_lines(rows) {
        println!("{}", line);
    }

    println!();
    for line in summary_lines(&Summary::of(rows)) {
        println!("{}", line);
    }
    println!();

    let candidates = candidate_lines(rows);
    if !candidates.is_empty() {
        for line in candidates {
            println!("{}", line);
        }
        println!();
    }
}

fn table_lines(rows: &[&FileLines]) -> Vec<String> {
    let path_width = rows
        .iter()
        .map(|f| f.path.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_PATH_WIDTH);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}{}{}",
            left,
            "─".repeat(path_width + 2),
            mid,
            "─".repeat(LINES_WIDTH + 2),
            mid,
            "─".repeat(SIZE_WIDTH + 2),
            right
        )
    };
    let total_width = path_width + LINES_WIDTH + SIZE_WIDTH + 10;

    let mut out = Vec::with_capacity(rows.len() + 5);
    out.push(format!(
        "{:^width$}",
        "Code Lines Analysis Report",
        width = total_width
    ).blue().bold().to_string());
    out.push(rule("╭", "┬", "╮"));
    out.push(format!(
        "│ {} │ {} │ {} │",
        pad_right("File Path", path_width).magenta().bold(),
        format!("{:>width$}", "Lines", width = LINES_WIDTH).magenta().bold(),
        format!("{:^width$}", "Size", width = SIZE_WIDTH).magenta().bold(),
    ));
    out.push(rule("├", "┼", "┤"));
    for fi in rows {
        out.push(format!(
            "│ {} │ {} │ {} │",
            pad_right(&fi.path, path_width).cyan(),
            format!("{:>width$}", fmt_num(fi.lines), width = LINES_WIDTH).green(),
            colored_size(fi.size_class()),
        ));
    }
    out.push(rule("╰", "┴", "╯"));
    out
}

fn summary_lines(summary: &Summary) -> Vec<String> {
    let mut out = vec![format!("{}", "Summary".green().bold())];
    let row = |label: &str, value: String| format!("  {:<25} {}", label.bold(), value.cyan());
    out.push(row("Total Files:", fmt_num(summary.total_files)));
    out.push(row("Total Lines:", fmt_num(summary.total_lines)));
    out.push(row("Average Lines per File:", fmt_num(summary.average_lines)));
    if let Some(largest) = summary.largest {
        out.push(row(
            "Largest File:",
            format!("{} ({} lines)", largest.path, fmt_num(largest.lines)),
        ));
    }
    out
}

fn candidate_lines(rows: &[&FileLines]) -> Vec<String> {
    let candidates: Vec<_> = rows.iter().filter(|f| f.is_refactor_candidate()).collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut out = vec![format!(
        "{}",
        format!("Refactoring Candidates (>{} lines):", REFACTOR_THRESHOLD).red().bold()
    )];
    for fi in candidates.iter().take(MAX_CANDIDATES) {
        out.push(format!(
            "  - {} ({})",
            fi.path.cyan(),
            format!("{} lines", fmt_num(fi.lines)).red()
        ));
    }
    if candidates.len() > MAX_CANDIDATES {
        out.push(format!(
            "  ... and {} more files",
            candidates.len() - MAX_CANDIDATES
        ));
    }
    out
}
