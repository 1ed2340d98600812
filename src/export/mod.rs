// Author: kelexine (https://github.com/kelexine)
// export/mod.rs — Export dispatcher

pub mod csv;
pub mod json;

use crate::models::{FileLines, ScanResult};
use anyhow::Result;
use std::path::Path;

pub enum ExportFormat {
    Json,
    Jsonl,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Format for `path`, or an error naming the supported extensions.
    pub fn for_output(path: &Path) -> Result<Self> {
        match Self::from_path(path) {
            Some(format) => Ok(format),
            None => anyhow::bail!(
                "Unsupported export format '{}'. Use .json, .jsonl, or .csv",
                path.extension().and_then(|e| e.to_str()).unwrap_or("?")
            ),
        }
    }
}

/// What gets written: the rows shown in the report plus the scan they came from.
pub struct Report<'a> {
    pub result: &'a ScanResult,
    pub rows: &'a [&'a FileLines],
    pub min_lines: usize,
}

pub fn export(report: &Report, path: &Path) -> Result<()> {
    match ExportFormat::for_output(path)? {
        ExportFormat::Json => json::export_json(report, path),
        ExportFormat::Jsonl => json::export_jsonl(report, path),
        ExportFormat::Csv => csv::export_csv(report, path),
    }
}
