// Author: kelexine (https://github.com/kelexine)
// counter/mod.rs — Scan configuration and the scan → count pipeline

pub mod encoding;
pub mod lines;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cli::Args;
use crate::config::GlobalConfig;
use crate::export::ExportFormat;
use crate::matcher::IgnoreMode;
use crate::models::{FileLines, ScanResult};
use crate::scanner::{Scanner, resolve_root};

use lines::count_lines;

/// Below this many files the thread pool costs more than it saves.
const PARALLEL_THRESHOLD: usize = 50;

/// Configuration for a scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub min_lines: usize,
    pub ignore_mode: IgnoreMode,
    pub parallel: bool,
    pub export: Option<PathBuf>,
}

impl ScanConfig {
    /// Merge in the global config and validate everything that can fail
    /// before any scanning starts.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Self::merge(args, &GlobalConfig::load());
        if let Some(ref output) = config.export {
            ExportFormat::for_output(output)?;
        }
        config.root = resolve_root(&config.root)?;
        Ok(config)
    }

    /// CLI flags win over the global config file.
    pub fn merge(args: &Args, global: &GlobalConfig) -> Self {
        let flat = args.flat_ignore || global.flat_ignore.unwrap_or(false);
        Self {
            root: PathBuf::from(&args.path),
            min_lines: args.min.or(global.min_lines).unwrap_or(0),
            ignore_mode: if flat { IgnoreMode::Flat } else { IgnoreMode::Scoped },
            parallel: !args.no_parallel && global.parallel.unwrap_or(true),
            export: args.export.as_ref().map(PathBuf::from),
        }
    }
}

/// Scan the configured root and count every code file found.
pub fn run_scan(config: &ScanConfig) -> Result<ScanResult> {
    let scanner = Scanner::new(&config.root, config.ignore_mode)?;
    info!(root = %scanner.root().display(), mode = ?config.ignore_mode, "scanning");

    let files = scanner.scan();
    let rows = count_all(&scanner, &files, config.parallel);

    Ok(ScanResult::new(scanner.root().to_path_buf(), rows, files.len()))
}

fn count_all(scanner: &Scanner, files: &[PathBuf], parallel: bool) -> Vec<FileLines> {
    if parallel && files.len() > PARALLEL_THRESHOLD {
        files
            .par_iter()
            .filter_map(|path| count_one(scanner, path))
            .collect()
    } else {
        files
            .iter()
            .filter_map(|path| count_one(scanner, path))
            .collect()
    }
}

fn count_one(scanner: &Scanner, path: &Path) -> Option<FileLines> {
    match count_lines(path) {
        Ok(lines) => Some(FileLines::new(scanner.relative_path(path), lines)),
        Err(e) => {
            debug!("Skipped: {}", e);
            None
        }
    }
}
