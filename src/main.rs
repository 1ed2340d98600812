// get-lines — Code line counter
//
// Author : kelexine (https://github.com/kelexine)
// Version: Dynamic (Cargo.toml)
// License: MIT
//
// Walks a directory tree, keeps files that look like source code, skips
// anything excluded by .gitignore rules, counts lines whatever the text
// encoding, and prints a sorted report:
//   • Scoped .gitignore matching (flat ancestor-only mode on request)
//   • BOM sniffing + statistical encoding detection with strict fallbacks
//   • Rayon data-parallel counting, deterministic output order
//   • Optional JSON / JSONL / CSV export of the listed files

mod cli;
mod config;
mod counter;
mod display;
mod export;
mod language;
mod matcher;
mod models;
mod scanner;

use anyhow::Result;
use clap::Parser;
use std::process;
use tracing::{Level, warn};

use crate::display::fmt_num;

fn main() {
    let args = cli::Args::parse();
    init_logging(args.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        display::error("Operation cancelled by user");
        process::exit(1);
    }) {
        warn!("Cannot install interrupt handler: {}", e);
    }

    if let Err(e) = run(&args) {
        display::error(format!("{:#}", e));
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &cli::Args) -> Result<()> {
    let config = counter::ScanConfig::from_args(args)?;

    display::info(format!("Scanning directory: {}", config.root.display()));
    let result = counter::run_scan(&config)?;

    if result.skipped > 0 {
        display::info(format!(
            "Processed {} files, skipped {} files (access denied or read errors)",
            fmt_num(result.processed()),
            fmt_num(result.skipped)
        ));
    }

    let (rows, hidden) = result.filter_min(config.min_lines);
    if config.min_lines > 0 {
        display::info(format!(
            "Showing {} of {} files ({} below {} lines)",
            fmt_num(rows.len()),
            fmt_num(result.processed()),
            fmt_num(hidden),
            fmt_num(config.min_lines)
        ));
    }

    display::display_report(&rows);

    if let Some(ref output_file) = config.export {
        let report = export::Report {
            result: &result,
            rows: &rows,
            min_lines: config.min_lines,
        };
        export::export(&report, output_file)?;
        display::info(format!(
            "Exported {} files to {}",
            fmt_num(rows.len()),
            output_file.display()
        ));
    }

    Ok(())
}
